use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters that encodeURIComponent does NOT encode.
/// RFC 3986 unreserved: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const ENCODE_URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Character budget for job descriptions after HTML stripping.
pub(crate) const DESCRIPTION_LIMIT: usize = 500;

/// URL-encode a string for use in query parameters.
pub(crate) fn urlencoded(s: &str) -> String {
    utf8_percent_encode(s, ENCODE_URI_COMPONENT_SET).to_string()
}

/// Strip HTML tags and decode the handful of entities job boards
/// actually emit in descriptions.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Truncate to at most `max` characters, on a char boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Group an integer with thousands separators, e.g. 125000 -> "125,000".
pub(crate) fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_decodes_entities() {
        let html = "<p>Senior <b>Rust</b> role.&nbsp;Pay &gt; market &amp; equity.</p>";
        assert_eq!(strip_html(html), "Senior Rust role. Pay > market & equity.");
    }

    #[test]
    fn strip_html_passes_plain_text_through() {
        assert_eq!(strip_html("  just text  "), "just text");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 500), "short");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(950), "950");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(125000), "125,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn urlencoded_matches_encode_uri_component() {
        assert_eq!(urlencoded("rust engineer"), "rust%20engineer");
        assert_eq!(urlencoded("c++ & go"), "c%2B%2B%20%26%20go");
        assert_eq!(urlencoded("it's-fine_1.0"), "it's-fine_1.0");
    }
}

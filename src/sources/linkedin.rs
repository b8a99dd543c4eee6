//! Synthetic search-link fallback.
//!
//! When a source cannot return real postings (no credentials, provider
//! failure, quota), it hands the user a LinkedIn search URL instead of
//! nothing. The record has the same shape as a real posting and is
//! recognized downstream by its sentinel company name.

use chrono::Utc;

use crate::models::job::{ExternalJob, SEARCH_LINK_COMPANY, Source};
use crate::sources::text::urlencoded;

/// Common location names mapped to LinkedIn geoId values, so the
/// generated URL applies LinkedIn's own location filter.
const GEO_IDS: &[(&str, &str)] = &[
    ("india", "102713980"),
    ("united states", "103644243"),
    ("usa", "103644243"),
    ("uk", "101165590"),
    ("united kingdom", "101165590"),
    ("germany", "100253013"),
    ("france", "100505898"),
    ("canada", "103714735"),
    ("australia", "100490277"),
    ("japan", "102029554"),
    ("singapore", "102454443"),
    ("dubai", "100893291"),
    ("uae", "100893291"),
    ("netherlands", "102890719"),
    ("spain", "100994617"),
    ("italy", "103350119"),
    ("brazil", "100988488"),
    ("mexico", "103596953"),
    ("ireland", "101393091"),
];

/// Resolve a free-text location to a LinkedIn geoId, case-insensitive
/// and whitespace-tolerant. Unknown locations get no geoId and the URL
/// stays keyword-only.
fn geo_id(location: &str) -> Option<&'static str> {
    let needle = location.trim().to_lowercase();
    GEO_IDS
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, id)| *id)
}

/// Build the single fallback record pointing at a manual LinkedIn search.
pub fn search_link(query: &str, location: Option<&str>) -> ExternalJob {
    let mut url = format!(
        "https://www.linkedin.com/jobs/search/?keywords={}",
        urlencoded(query)
    );
    if let Some(id) = location.and_then(geo_id) {
        url.push_str(&format!("&geoId={id}"));
    }

    let in_location = location
        .map(|loc| format!(" in {loc}"))
        .unwrap_or_default();

    ExternalJob {
        id: format!("linkedin-search-{}", Utc::now().timestamp_millis()),
        title: format!("Search \"{query}\"{in_location} on LinkedIn"),
        company: SEARCH_LINK_COMPANY.to_string(),
        location: location.unwrap_or("Worldwide").to_string(),
        salary: "Salary varies".to_string(),
        description: format!(
            "Click to search for {query} positions{in_location} on LinkedIn. \
             LinkedIn's filters will be applied to show jobs in your selected location."
        ),
        source: Source::JSearch,
        apply_url: Some(url),
        country_code: Some(location.unwrap_or("Global").to_string()),
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::job::{ExternalJob, Source};
use crate::sources::text::{DESCRIPTION_LIMIT, strip_html, truncate_chars, urlencoded};
use crate::sources::{JobSource, SourceError};

const BASE_URL: &str = "https://www.arbeitnow.com/api/job-board-api";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Arbeitnow job board adapter: free, no auth, mostly European and
/// remote-friendly listings. No salary data is published.
pub struct Arbeitnow {
    client: reqwest::Client,
}

impl Arbeitnow {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<ExternalJob>, SourceError> {
        let url = format!("{BASE_URL}?search={}", urlencoded(query));

        let resp = self.client.get(&url).timeout(TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let data: Value = resp.json().await?;
        let results = data
            .get("data")
            .and_then(|v| v.as_array())
            .ok_or(SourceError::Decode)?;

        Ok(results.iter().filter_map(parse_job).collect())
    }
}

#[async_trait]
impl JobSource for Arbeitnow {
    fn name(&self) -> &'static str {
        "arbeitnow"
    }

    async fn search(&self, query: &str, _location: Option<&str>) -> Vec<ExternalJob> {
        match self.fetch(query).await {
            Ok(jobs) => {
                tracing::debug!(source = self.name(), count = jobs.len(), "fetched jobs");
                jobs
            }
            Err(e) => {
                tracing::warn!(source = self.name(), error = %e, "fetch failed");
                Vec::new()
            }
        }
    }
}

fn parse_job(raw: &Value) -> Option<ExternalJob> {
    let slug = raw.get("slug").and_then(|v| v.as_str())?;
    let text = |key: &str| raw.get(key).and_then(|v| v.as_str());

    let description = text("description")
        .map(|d| truncate_chars(&strip_html(d), DESCRIPTION_LIMIT))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "No description available".to_string());

    Some(ExternalJob {
        id: format!("arbeitnow-{slug}"),
        title: text("title").unwrap_or("Untitled Position").to_string(),
        company: text("company_name")
            .unwrap_or("Company Name Unavailable")
            .to_string(),
        location: text("location").unwrap_or("Europe").to_string(),
        salary: "Salary not disclosed".to_string(),
        description,
        source: Source::Arbeitnow,
        apply_url: text("url").map(String::from),
        country_code: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_record_and_strips_markup() {
        let raw = json!({
            "slug": "rust-dev-berlin-4711",
            "title": "Rust Developer",
            "company_name": "Initech",
            "location": "Berlin",
            "description": "<p>Write <b>fast</b> code &amp; ship it.</p>",
            "url": "https://arbeitnow.example/job/4711"
        });

        let job = parse_job(&raw).expect("slug present");
        assert_eq!(job.id, "arbeitnow-rust-dev-berlin-4711");
        assert_eq!(job.description, "Write fast code & ship it.");
        assert_eq!(job.salary, "Salary not disclosed");
        assert_eq!(job.source, Source::Arbeitnow);
    }

    #[test]
    fn record_without_slug_is_dropped() {
        assert!(parse_job(&json!({ "title": "No slug" })).is_none());
    }

    #[test]
    fn location_defaults_to_europe() {
        let job = parse_job(&json!({ "slug": "x" })).unwrap();
        assert_eq!(job.location, "Europe");
        assert_eq!(job.title, "Untitled Position");
    }
}

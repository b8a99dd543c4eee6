use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::job::{ExternalJob, Source};
use crate::sources::text::{DESCRIPTION_LIMIT, strip_html, thousands, truncate_chars};
use crate::sources::{JobSource, SourceError};

const BASE_URL: &str = "https://remoteok.com/api";
const TIMEOUT: Duration = Duration::from_secs(10);
// The API has no search parameter; we filter client-side and keep the
// first few matches.
const MAX_MATCHES: usize = 10;

/// RemoteOK adapter: public API, no auth, remote-only listings.
pub struct RemoteOk {
    client: reqwest::Client,
}

impl RemoteOk {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<ExternalJob>, SourceError> {
        let resp = self.client.get(BASE_URL).timeout(TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let data: Value = resp.json().await?;
        // The first array element is a legal notice, not a job; it has
        // no position field and never matches a query.
        let listings = data.as_array().ok_or(SourceError::Decode)?;

        let lower_query = query.to_lowercase();
        Ok(listings
            .iter()
            .filter(|raw| matches_query(raw, &lower_query))
            .take(MAX_MATCHES)
            .filter_map(parse_job)
            .collect())
    }
}

#[async_trait]
impl JobSource for RemoteOk {
    fn name(&self) -> &'static str {
        "remoteok"
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

/// Case-insensitive match of the query against position, company, and tags.
fn matches_query(raw: &Value, lower_query: &str) -> bool {
    let mut haystack = String::new();
    for key in ["position", "company"] {
        if let Some(text) = raw.get(key).and_then(|v| v.as_str()) {
            haystack.push_str(text);
            haystack.push(' ');
        }
    }
    if let Some(tags) = raw.get("tags").and_then(|v| v.as_array()) {
        for tag in tags.iter().filter_map(|t| t.as_str()) {
            haystack.push_str(tag);
            haystack.push(' ');
        }
    }
    haystack.to_lowercase().contains(lower_query)
}

fn parse_job(raw: &Value) -> Option<ExternalJob> {
    let id = match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };
    let text = |key: &str| raw.get(key).and_then(|v| v.as_str());

    let description = text("description")
        .map(|d| truncate_chars(&strip_html(d), DESCRIPTION_LIMIT))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "No description available".to_string());

    Some(ExternalJob {
        id: format!("remoteok-{id}"),
        title: text("position").unwrap_or("Untitled Position").to_string(),
        company: text("company")
            .unwrap_or("Company Name Unavailable")
            .to_string(),
        location: text("location")
            .filter(|l| !l.is_empty())
            .unwrap_or("Remote")
            .to_string(),
        salary: format_salary(
            raw.get("salary_min").and_then(|v| v.as_f64()),
            raw.get("salary_max").and_then(|v| v.as_f64()),
        ),
        description,
        source: Source::RemoteOk,
        apply_url: text("url").map(String::from),
        country_code: None,
    })
}

fn format_salary(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (None, None) => "Salary not disclosed".to_string(),
        (Some(min), Some(max)) => {
            format!("${} - ${}", thousands(min as u64), thousands(max as u64))
        }
        (Some(min), None) => format!("${}+", thousands(min as u64)),
        (None, Some(max)) => format!("Up to ${}", thousands(max as u64)),
    }
}

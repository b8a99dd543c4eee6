use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::models::job::{ExternalJob, Source};
use crate::sources::text::{DESCRIPTION_LIMIT, strip_html, truncate_chars};
use crate::sources::{JobSource, SourceError};

const BASE_URL: &str = "https://jooble.org/api";
const TIMEOUT: Duration = Duration::from_secs(10);

/// Jooble adapter. The API key is embedded in the request path and the
/// search criteria are POSTed as JSON.
pub struct Jooble {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl Jooble {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    async fn fetch(&self, query: &str, location: Option<&str>) -> Result<Vec<ExternalJob>, SourceError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(SourceError::MissingCredentials);
        };

        let body = json!({
            "keywords": query,
            "location": location.unwrap_or(""),
            "salary_min": "",
            "job_type": "",
            "posted_date": "",
        });

        let resp = self
            .client
            .post(format!("{BASE_URL}/{api_key}"))
            .json(&body)
            .timeout(TIMEOUT)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let data: Value = resp.json().await?;
        let jobs = data
            .get("jobs")
            .and_then(|v| v.as_array())
            .ok_or(SourceError::Decode)?;

        Ok(jobs.iter().filter_map(parse_job).collect())
    }
}

#[async_trait]
impl JobSource for Jooble {
    fn name(&self) -> &'static str {
        "jooble"
    }

    async fn search(&self, query: &str, location: Option<&str>) -> Vec<ExternalJob> {
        match self.fetch(query, location).await {
            Ok(jobs) => {
                tracing::debug!(source = self.name(), count = jobs.len(), "fetched jobs");
                jobs
            }
            Err(SourceError::MissingCredentials) => {
                tracing::warn!(source = self.name(), "API key not configured");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(source = self.name(), error = %e, "fetch failed");
                Vec::new()
            }
        }
    }
}

fn parse_job(raw: &Value) -> Option<ExternalJob> {
    let uid = match raw.get("uid") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };
    let text = |key: &str| raw.get(key).and_then(|v| v.as_str());

    let is_remote = raw
        .get("is_remote_job")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let location = if is_remote {
        "Remote".to_string()
    } else {
        raw.pointer("/location/name")
            .and_then(|v| v.as_str())
            .filter(|l| !l.is_empty())
            .unwrap_or("Location Not Specified")
            .to_string()
    };

    // Jooble publishes either a formatted salary string or a bare
    // estimated number, sometimes neither.
    let salary = text("salary")
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| {
            raw.get("estimated_salary")
                .and_then(|v| v.as_f64())
                .map(|v| format!("{}", v as u64))
        })
        .unwrap_or_else(|| "Salary not disclosed".to_string());

    let description = text("content")
        .map(|d| truncate_chars(&strip_html(d), DESCRIPTION_LIMIT))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "No description available".to_string());

    Some(ExternalJob {
        id: format!("jooble-{uid}"),
        title: text("position").unwrap_or("Untitled Position").to_string(),
        company: raw
            .pointer("/company/name")
            .and_then(|v| v.as_str())
            .filter(|c| !c.is_empty())
            .unwrap_or("Company Name Unavailable")
            .to_string(),
        location,
        salary,
        description,
        source: Source::Jooble,
        apply_url: text("url").map(String::from),
        country_code: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_record_with_formatted_salary() {
        let raw = json!({
            "uid": "778899",
            "position": "Site Reliability Engineer",
            "company": { "name": "Wayne Enterprises" },
            "location": { "name": "Gotham" },
            "salary": "$100k - $140k",
            "content": "<b>On-call</b> rotation included",
            "url": "https://jooble.example/j/778899",
            "is_remote_job": false
        });

        let job = parse_job(&raw).unwrap();
        assert_eq!(job.id, "jooble-778899");
        assert_eq!(job.location, "Gotham");
        assert_eq!(job.salary, "$100k - $140k");
        assert_eq!(job.description, "On-call rotation included");
        assert_eq!(job.source, Source::Jooble);
    }

    #[test]
    fn remote_flag_overrides_location() {
        let raw = json!({
            "uid": "1",
            "position": "Writer",
            "location": { "name": "Kyiv" },
            "is_remote_job": true
        });
        assert_eq!(parse_job(&raw).unwrap().location, "Remote");
    }

    #[test]
    fn estimated_salary_used_when_text_absent() {
        let raw = json!({ "uid": "2", "estimated_salary": 95000.0 });
        assert_eq!(parse_job(&raw).unwrap().salary, "95000");
    }

    #[test]
    fn record_without_uid_is_dropped() {
        assert!(parse_job(&json!({ "position": "Ghost" })).is_none());
    }

    #[tokio::test]
    async fn missing_key_yields_empty_result() {
        let source = Jooble::new(reqwest::Client::new(), None);
        assert!(source.search("plumber", Some("Berlin")).await.is_empty());
    }
}

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::job::{ExternalJob, Source};
use crate::sources::text::{DESCRIPTION_LIMIT, strip_html, thousands, truncate_chars, urlencoded};
use crate::sources::{JobSource, SourceError};

const BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs/gb/search/1";
const TIMEOUT: Duration = Duration::from_secs(10);
const RESULTS_PER_PAGE: u32 = 10;

/// Adzuna adapter (UK index). Requires an app id and key; without them
/// the adapter degrades to an empty result.
pub struct Adzuna {
    client: reqwest::Client,
    app_id: Option<String>,
    app_key: Option<String>,
}

impl Adzuna {
    pub fn new(client: reqwest::Client, app_id: Option<String>, app_key: Option<String>) -> Self {
        Self {
            client,
            app_id,
            app_key,
        }
    }

    async fn fetch(&self, query: &str) -> Result<Vec<ExternalJob>, SourceError> {
        let (Some(app_id), Some(app_key)) = (self.app_id.as_deref(), self.app_key.as_deref())
        else {
            return Err(SourceError::MissingCredentials);
        };

        let url = format!(
            "{BASE_URL}?app_id={app_id}&app_key={app_key}&results_per_page={RESULTS_PER_PAGE}&what={}",
            urlencoded(query)
        );

        let resp = self.client.get(&url).timeout(TIMEOUT).send().await?;
        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let data: Value = resp.json().await?;
        let results = data
            .get("results")
            .and_then(|v| v.as_array())
            .ok_or(SourceError::Decode)?;

        Ok(results.iter().filter_map(parse_job).collect())
    }
}

#[async_trait]
impl JobSource for Adzuna {
    fn name(&self) -> &'static str {
        "adzuna"
    }

    async fn search(&self, query: &str, _location: Option<&str>) -> Vec<ExternalJob> {
        match self.fetch(query).await {
            Ok(jobs) => {
                tracing::debug!(source = self.name(), count = jobs.len(), "fetched jobs");
                jobs
            }
            Err(SourceError::MissingCredentials) => {
                tracing::warn!(source = self.name(), "credentials not configured");
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
    let id = match raw.get("id") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return None,
    };

    let description = raw
        .get("description")
        .and_then(|v| v.as_str())
        .map(|d| truncate_chars(&strip_html(d), DESCRIPTION_LIMIT))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "No description available".to_string());

    Some(ExternalJob {
        id: format!("adzuna-{id}"),
        title: raw
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or("Untitled Position")
            .to_string(),
        company: raw
            .pointer("/company/display_name")
            .and_then(|v| v.as_str())
            .unwrap_or("Company Name Unavailable")
            .to_string(),
        location: raw
            .pointer("/location/display_name")
            .and_then(|v| v.as_str())
            .unwrap_or("Location Not Specified")
            .to_string(),
        salary: format_salary(
            raw.get("salary_min").and_then(|v| v.as_f64()),
            raw.get("salary_max").and_then(|v| v.as_f64()),
        ),
        description,
        source: Source::Adzuna,
        apply_url: raw
            .get("redirect_url")
            .and_then(|v| v.as_str())
            .map(String::from),
        country_code: None,
    })
}

/// Adzuna's GB index quotes in pounds.
fn format_salary(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (None, None) => "Salary not disclosed".to_string(),
        (Some(min), Some(max)) => {
            format!("£{} - £{}", thousands(min as u64), thousands(max as u64))
        }
        (Some(min), None) => format!("£{}+", thousands(min as u64)),
        (None, Some(max)) => format!("Up to £{}", thousands(max as u64)),
    }
}

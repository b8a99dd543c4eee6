use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::job::{ExternalJob, Source};
use crate::sources::text::{DESCRIPTION_LIMIT, thousands, truncate_chars, urlencoded};
use crate::sources::{JobSource, SourceError, linkedin};

const HOST: &str = "jsearch.p.rapidapi.com";
const TIMEOUT: Duration = Duration::from_secs(8);
// Two pages per search to get a reasonable result count.
const NUM_PAGES: u32 = 2;

/// JSearch (RapidAPI) adapter. The primary source; on any soft failure
/// it degrades to a LinkedIn search link rather than an empty list.
pub struct JSearch {
    client: reqwest::Client,
    api_key: Option<String>,
}

impl JSearch {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self { client, api_key }
    }

    async fn fetch(&self, api_key: &str, query: &str) -> Result<Vec<ExternalJob>, SourceError> {
        // Search by title/skill only; location is applied by the filter
        // stage downstream, which works better with this provider.
        let url = format!(
            "https://{HOST}/search?query={}&page=1&num_pages={NUM_PAGES}&date_posted=all",
            urlencoded(query)
        );

        let resp = self
            .client
            .get(&url)
            .header("x-rapidapi-key", api_key)
            .header("x-rapidapi-host", HOST)
            .timeout(TIMEOUT)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SourceError::Status(resp.status()));
        }

        let data: Value = resp.json().await?;

        if quota_exceeded(&data) {
            return Err(SourceError::QuotaExceeded);
        }

        let results = data
            .get("data")
            .and_then(|v| v.as_array())
            .ok_or(SourceError::Decode)?;

        Ok(results.iter().map(parse_job).collect())
    }
}

#[async_trait]
impl JobSource for JSearch {
    fn name(&self) -> &'static str {
        "jsearch"
    }

    async fn search(&self, query: &str, location: Option<&str>) -> Vec<ExternalJob> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(source = self.name(), "API key not configured, returning search link");
            return vec![linkedin::search_link(query, location)];
        };

        match self.fetch(api_key, query).await {
            Ok(jobs) => {
                tracing::debug!(source = self.name(), count = jobs.len(), "fetched jobs");
                jobs
            }
            Err(e) => {
                tracing::warn!(source = self.name(), error = %e, "fetch failed, returning search link");
                vec![linkedin::search_link(query, location)]
            }
        }
    }
}

/// RapidAPI reports exhausted quotas as a 200 with a message body.
fn quota_exceeded(data: &Value) -> bool {
    data.get("message")
        .and_then(|v| v.as_str())
        .is_some_and(|msg| msg.contains("exceeded") && msg.contains("quota"))
}

fn parse_job(raw: &Value) -> ExternalJob {
    let text = |key: &str| raw.get(key).and_then(|v| v.as_str());

    let job_id = text("job_id").unwrap_or("unknown");
    let title = text("job_title").unwrap_or("Untitled Position").to_string();
    let company = text("employer_name")
        .unwrap_or("Company Name Unavailable")
        .to_string();

    let city = text("job_city");
    let state = text("job_state");
    let country = text("job_country");
    let location = match (city, state) {
        (Some(city), Some(state)) => format!("{city}, {state}"),
        (Some(city), None) => city.to_string(),
        // No city: use the country name if it is more than a bare
        // two-letter code, otherwise assume remote.
        (None, _) => match country {
            Some(c) if c.len() > 2 => c.to_string(),
            _ => "Remote".to_string(),
        },
    };

    let salary = format_salary(
        raw.get("job_min_salary").and_then(|v| v.as_f64()),
        raw.get("job_max_salary").and_then(|v| v.as_f64()),
        text("job_salary_currency"),
    );

    let description = text("job_description")
        .map(|d| truncate_chars(d, DESCRIPTION_LIMIT))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "No description available".to_string());

    ExternalJob {
        id: format!("jsearch-{job_id}"),
        title,
        company,
        location,
        salary,
        description,
        source: Source::JSearch,
        apply_url: text("job_apply_link").map(String::from),
        country_code: country.map(String::from),
    }
}

/// Currency-aware salary text: full range, minimum only, or maximum only.
fn format_salary(min: Option<f64>, max: Option<f64>, currency: Option<&str>) -> String {
    let curr = currency.unwrap_or("USD");
    match (min, max) {
        (None, None) => "Salary not disclosed".to_string(),
        (Some(min), Some(max)) => format!(
            "${} - ${} {curr}",
            thousands(min as u64),
            thousands(max as u64)
        ),
        (Some(min), None) => format!("${}+ {curr}", thousands(min as u64)),
        (None, Some(max)) => format!("Up to ${} {curr}", thousands(max as u64)),
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company name used by synthetic search-link records. The filter layer
/// recognizes it and skips location filtering, since the link itself
/// already carries the location intent.
pub const SEARCH_LINK_COMPANY: &str = "LinkedIn";

/// Which external provider a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    JSearch,
    RemoteOk,
    Adzuna,
    Arbeitnow,
    Jooble,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::JSearch => "jsearch",
            Source::RemoteOk => "remoteok",
            Source::Adzuna => "adzuna",
            Source::Arbeitnow => "arbeitnow",
            Source::Jooble => "jooble",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized job record as produced by a source adapter.
///
/// Adapters guarantee every text field is non-empty by substituting
/// placeholders for anything the provider omits. Records are immutable
/// once built; the pipeline only filters, dedupes, and maps them.
#[derive(Debug, Clone)]
pub struct ExternalJob {
    /// Source-prefixed id, e.g. `jsearch-<native-id>`, so provider ids
    /// cannot collide across sources.
    pub id: String,
    pub title: String,
    pub company: String,
    /// City/region, country name, or the literal "Remote".
    pub location: String,
    /// Formatted compensation text, or "Salary not disclosed".
    pub salary: String,
    /// Plain text, HTML stripped, truncated to ~500 chars.
    pub description: String,
    pub source: Source,
    pub apply_url: Option<String>,
    /// Secondary location signal; only consulted by the location filter.
    pub country_code: Option<String>,
}

impl ExternalJob {
    /// True for fallback records that point at a manual search URL
    /// rather than a real posting.
    pub fn is_search_link(&self) -> bool {
        self.company == SEARCH_LINK_COMPANY
    }
}

/// Search criteria accepted by the aggregation pipeline. All criteria
/// other than the query are optional and ANDed together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFilters {
    #[serde(default)]
    pub query: String,
    pub job_type: Option<JobType>,
    pub location: Option<String>,
    pub salary_min: Option<u32>,
    pub salary_max: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    Remote,
    Onsite,
    Hybrid,
}

/// Externally exposed listing shape returned by the search API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub salary_range: String,
    pub experience_level: String,
    /// Includes title, company, source tag, and an `apply_url:<url>`
    /// pseudo-keyword kept for older consumers that extract the link
    /// from keywords instead of reading `apply_url`.
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ExternalJob> for JobListing {
    fn from(job: ExternalJob) -> Self {
        let mut keywords = vec![
            job.title.clone(),
            job.company.clone(),
            job.source.as_str().to_string(),
        ];
        if let Some(url) = &job.apply_url {
            keywords.push(format!("apply_url:{url}"));
        }

        JobListing {
            id: job.id,
            title: job.title,
            company: job.company,
            location: job.location,
            description: job.description,
            salary_range: job.salary,
            experience_level: "entry".to_string(),
            keywords,
            apply_url: job.apply_url,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> ExternalJob {
        ExternalJob {
            id: "jsearch-abc123".to_string(),
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            salary: "$90,000 - $120,000 USD".to_string(),
            description: "Build services.".to_string(),
            source: Source::JSearch,
            apply_url: Some("https://example.com/apply".to_string()),
            country_code: Some("DE".to_string()),
        }
    }

    #[test]
    fn listing_embeds_apply_url_as_field_and_keyword() {
        let listing = JobListing::from(sample_job());
        assert_eq!(
            listing.apply_url.as_deref(),
            Some("https://example.com/apply")
        );
        assert!(
            listing
                .keywords
                .contains(&"apply_url:https://example.com/apply".to_string())
        );
        assert!(listing.keywords.contains(&"jsearch".to_string()));
        assert_eq!(listing.experience_level, "entry");
    }

    #[test]
    fn listing_without_apply_url_has_no_pseudo_keyword() {
        let mut job = sample_job();
        job.apply_url = None;
        let listing = JobListing::from(job);
        assert!(listing.apply_url.is_none());
        assert!(!listing.keywords.iter().any(|k| k.starts_with("apply_url:")));
    }

    #[test]
    fn search_link_detection_uses_company_sentinel() {
        let mut job = sample_job();
        assert!(!job.is_search_link());
        job.company = SEARCH_LINK_COMPANY.to_string();
        assert!(job.is_search_link());
    }
}

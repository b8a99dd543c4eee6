// Source adapters: one per external job provider.
// Each adapter maps its provider's native response into ExternalJob and
// swallows every provider failure behind its own fallback.

pub mod adzuna;
pub mod arbeitnow;
pub mod jooble;
pub mod jsearch;
pub mod linkedin;
pub mod remoteok;
mod text;

use async_trait::async_trait;

use crate::config::Config;
use crate::models::job::ExternalJob;

/// Trait implemented by every job source adapter.
///
/// `search` is infallible: timeouts, bad payloads, missing credentials,
/// and quota exhaustion all degrade to the adapter's own fallback (an
/// empty list or a synthetic search-link record), so one bad source can
/// never block or fail the others.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Source tag, matching the `Source` enum string form.
    fn name(&self) -> &'static str;

    /// Fetch jobs for a query, with an optional location hint. Each
    /// adapter bounds its own wait with a per-request timeout.
    async fn search(&self, query: &str, location: Option<&str>) -> Vec<ExternalJob>;
}

/// Failures internal to an adapter's fetch path. These never cross the
/// `JobSource` boundary.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("credentials not configured")]
    MissingCredentials,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {0}")]
    Status(reqwest::StatusCode),

    #[error("provider quota exceeded")]
    QuotaExceeded,

    #[error("unexpected response shape")]
    Decode,
}

/// Build the full adapter set. Credentials come from the config rather
/// than the process environment so adapters stay testable.
pub fn all_sources(config: &Config, client: &reqwest::Client) -> Vec<Box<dyn JobSource>> {
    vec![
        Box::new(jsearch::JSearch::new(
            client.clone(),
            config.jsearch_api_key.clone(),
        )),
        Box::new(arbeitnow::Arbeitnow::new(client.clone())),
        Box::new(remoteok::RemoteOk::new(client.clone())),
        Box::new(adzuna::Adzuna::new(
            client.clone(),
            config.adzuna_app_id.clone(),
            config.adzuna_app_key.clone(),
        )),
        Box::new(jooble::Jooble::new(
            client.clone(),
            config.jooble_api_key.clone(),
        )),
    ]
}

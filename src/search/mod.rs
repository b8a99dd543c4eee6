// The aggregation pipeline: fan out to every source concurrently,
// merge whatever settles, then filter, dedupe, cap, and convert.

pub mod dedupe;
pub mod filter;

use crate::models::job::{ExternalJob, JobFilters, JobListing};
use crate::sources::JobSource;

/// Cap applied after deduplication.
pub const MAX_RESULTS: usize = 60;

/// Stateless search facade over the configured source adapters.
pub struct SearchService {
    sources: Vec<Box<dyn JobSource>>,
}

impl SearchService {
    pub fn new(sources: Vec<Box<dyn JobSource>>) -> Self {
        Self { sources }
    }

    /// Run one search request through the whole pipeline.
    ///
    /// Every adapter is fired concurrently and awaited to completion
    /// (adapter `search` is infallible, so every outcome merges); total
    /// latency is bounded by the slowest adapter's own timeout, not the
    /// sum of all of them. Per-adapter native ordering is preserved
    /// through the order-preserving filter and dedupe stages.
    pub async fn search(&self, filters: &JobFilters) -> Vec<JobListing> {
        let query = filters.query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let location = filters.location.as_deref();

        let calls = self.sources.iter().map(|s| s.search(query, location));
        let settled = futures::future::join_all(calls).await;

        let all: Vec<ExternalJob> = settled.into_iter().flatten().collect();
        tracing::info!(
            total = all.len(),
            sources = self.sources.len(),
            "collected jobs from all sources"
        );

        let filtered = filter::apply(all, filters);
        let deduped = dedupe::dedupe(filtered);
        deduped
            .into_iter()
            .take(MAX_RESULTS)
            .map(JobListing::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::models::job::Source;
    use crate::sources::{jsearch::JSearch, linkedin};

    struct StaticSource {
        name: &'static str,
        jobs: Vec<ExternalJob>,
        delay: Duration,
    }

    #[async_trait]
    impl JobSource for StaticSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn search(&self, _query: &str, _location: Option<&str>) -> Vec<ExternalJob> {
            tokio::time::sleep(self.delay).await;
            self.jobs.clone()
        }
    }

    fn job(id: &str, title: &str, company: &str, source: Source) -> ExternalJob {
        ExternalJob {
            id: id.to_string(),
            title: title.to_string(),
            company: company.to_string(),
            location: "Remote".to_string(),
            salary: "Salary not disclosed".to_string(),
            description: "n/a".to_string(),
            source,
            apply_url: Some(format!("https://example.com/{id}")),
            country_code: None,
        }
    }

    fn query(q: &str) -> JobFilters {
        JobFilters {
            query: q.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn empty_query_returns_nothing() {
        let service = SearchService::new(vec![Box::new(StaticSource {
            name: "static",
            jobs: vec![job("a", "Engineer", "Acme", Source::JSearch)],
            delay: Duration::ZERO,
        })]);
        assert!(service.search(&query("   ")).await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_delays_but_never_drops_others() {
        let fast_jobs: Vec<ExternalJob> = (0..5)
            .map(|i| job(&format!("fast-{i}"), &format!("Role {i}"), "Acme", Source::Adzuna))
            .collect();
        let service = SearchService::new(vec![
            Box::new(StaticSource {
                name: "slow",
                jobs: vec![job("slow-1", "Late Role", "Tardy Inc", Source::Jooble)],
                delay: Duration::from_secs(9),
            }),
            Box::new(StaticSource {
                name: "fast",
                jobs: fast_jobs,
                delay: Duration::ZERO,
            }),
            Box::new(StaticSource {
                name: "degraded",
                jobs: Vec::new(),
                delay: Duration::ZERO,
            }),
        ]);

        let results = service.search(&query("rust")).await;
        assert_eq!(results.len(), 6);
        // Concatenation order follows adapter registration order.
        assert_eq!(results[0].id, "slow-1");
        assert_eq!(results[1].id, "fast-0");
    }

    #[tokio::test]
    async fn duplicate_across_sources_collapses_to_first() {
        let service = SearchService::new(vec![
            Box::new(StaticSource {
                name: "one",
                jobs: vec![job("one-1", "Software Engineer", "Acme", Source::JSearch)],
                delay: Duration::ZERO,
            }),
            Box::new(StaticSource {
                name: "two",
                jobs: vec![job("two-1", "Software Engineer", "Acme", Source::RemoteOk)],
                delay: Duration::ZERO,
            }),
        ]);

        let results = service.search(&query("engineer")).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "one-1");
    }

    #[tokio::test]
    async fn results_are_capped_at_sixty() {
        let jobs: Vec<ExternalJob> = (0..200)
            .map(|i| job(&format!("j-{i}"), &format!("Role {i}"), "Acme", Source::JSearch))
            .collect();
        let service = SearchService::new(vec![Box::new(StaticSource {
            name: "bulk",
            jobs,
            delay: Duration::ZERO,
        })]);

        let results = service.search(&query("role")).await;
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[tokio::test]
    async fn keyless_search_still_gives_the_user_something_to_click() {
        // Only sources with no credentials and no data configured: the
        // user still gets a navigable search link.
        let service = SearchService::new(vec![
            Box::new(JSearch::new(reqwest::Client::new(), None)),
            Box::new(StaticSource {
                name: "empty",
                jobs: Vec::new(),
                delay: Duration::ZERO,
            }),
        ]);

        let results = service.search(&query("React")).await;
        assert!(!results.is_empty());
        assert_eq!(results[0].company, crate::models::job::SEARCH_LINK_COMPANY);
        assert!(results[0].apply_url.as_deref().unwrap().contains("linkedin.com"));
    }

    #[tokio::test]
    async fn search_link_survives_location_filter() {
        let service = SearchService::new(vec![Box::new(StaticSource {
            name: "fallback-only",
            jobs: vec![linkedin::search_link("React", Some("India"))],
            delay: Duration::ZERO,
        })]);

        let mut filters = query("React");
        filters.location = Some("India".to_string());
        let results = service.search(&filters).await;
        assert_eq!(results.len(), 1);
    }
}

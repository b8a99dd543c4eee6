use std::sync::LazyLock;

use regex::Regex;

use crate::models::job::{ExternalJob, JobFilters, JobType};

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Keep the records matching ALL provided criteria. Order-preserving.
pub fn apply(jobs: Vec<ExternalJob>, filters: &JobFilters) -> Vec<ExternalJob> {
    jobs.into_iter()
        .filter(|job| matches(job, filters))
        .collect()
}

fn matches(job: &ExternalJob, filters: &JobFilters) -> bool {
    if let Some(job_type) = filters.job_type {
        let location = job.location.to_lowercase();
        match job_type {
            JobType::Remote => {
                if !location.contains("remote") {
                    return false;
                }
            }
            JobType::Onsite => {
                if location.contains("remote") {
                    return false;
                }
            }
            // Hybrid is a wildcard: providers rarely tag hybrid roles,
            // so jobs that don't specify are assumed flexible.
            JobType::Hybrid => {}
        }
    }

    // Search-link records bypass the location filter; the URL they
    // carry already encodes the location intent.
    if let Some(wanted) = &filters.location
        && !job.is_search_link()
    {
        let wanted = wanted.to_lowercase();
        let location = job.location.to_lowercase();
        let country = job
            .country_code
            .as_deref()
            .unwrap_or("")
            .to_lowercase();

        // Substring match in both directions to tolerate abbreviation
        // mismatches ("US" vs "United States").
        let hit = location.contains(&wanted)
            || country.contains(&wanted)
            || (!country.is_empty() && wanted.contains(&country));
        if !hit {
            return false;
        }
    }

    if filters.salary_min.is_some() || filters.salary_max.is_some() {
        let tokens = salary_tokens(&job.salary);
        // No numbers in the salary text means no basis for exclusion.
        if let (Some(&lowest), Some(&highest)) = (tokens.iter().min(), tokens.iter().max()) {
            if let Some(min) = filters.salary_min
                && highest < u64::from(min)
            {
                return false;
            }
            if let Some(max) = filters.salary_max
                && lowest > u64::from(max)
            {
                return false;
            }
        }
    }

    true
}

/// All digit-run tokens in the salary text.
fn salary_tokens(salary: &str) -> Vec<u64> {
    NUMBER_RE
        .find_iter(salary)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

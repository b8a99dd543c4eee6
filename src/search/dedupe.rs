use std::collections::HashSet;

use crate::models::job::ExternalJob;

/// Drop records sharing a normalized `(title, company)` signature.
/// First occurrence wins; order is otherwise preserved.
///
/// The signature deliberately ignores location, so two genuinely
/// different postings at the same company with the same title collapse
/// into one. That tradeoff matches how noisy the source data is.
pub fn dedupe(jobs: Vec<ExternalJob>) -> Vec<ExternalJob> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| seen.insert(signature(job)))
        .collect()
}

fn signature(job: &ExternalJob) -> String {
    format!(
        "{}-{}",
        job.title.to_lowercase().trim(),
        job.company.to_lowercase().trim()
    )
}

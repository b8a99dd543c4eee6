use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde::Serialize;

use crate::error::AppError;
use crate::models::job::{JobFilters, JobListing};
use crate::search::SearchService;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub total: usize,
    pub jobs: Vec<JobListing>,
}

/// GET /api/v1/jobs/search
///
/// Query-string filters: `query` (required), `jobType`
/// (remote|onsite|hybrid), `location`, `salaryMin`, `salaryMax`.
pub async fn search(
    State(service): State<Arc<SearchService>>,
    Query(filters): Query<JobFilters>,
) -> Result<Json<SearchResponse>, AppError> {
    if filters.query.trim().is_empty() {
        return Err(AppError::BadRequest("query must not be empty".to_string()));
    }

    let jobs = service.search(&filters).await;
    Ok(Json(SearchResponse {
        total: jobs.len(),
        jobs,
    }))
}

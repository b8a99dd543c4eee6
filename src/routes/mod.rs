pub mod search;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::search::SearchService;

pub fn router(service: Arc<SearchService>) -> Router {
    Router::new().nest(
        "/api/v1",
        Router::new()
            .route("/jobs/search", get(search::search))
            .with_state(service),
    )
}

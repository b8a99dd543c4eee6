mod config;
mod error;
mod models;
mod routes;
mod search;
mod sources;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::search::SearchService;

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jobfinder=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let client = reqwest::Client::builder()
        .user_agent(concat!("jobfinder/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let service = Arc::new(SearchService::new(sources::all_sources(&config, &client)));

    let app = Router::new()
        .route("/healthz", get(healthz))
        .merge(routes::router(service))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

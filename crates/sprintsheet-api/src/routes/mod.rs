//! Route table.

mod dashboard;
mod meta;
mod sprint;
mod table;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub use meta::{HealthResponse, RootResponse};

/// Build the API router over `state`, without CORS or tracing layers.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(meta::root))
        .route("/api/health", get(meta::health))
        .route("/api/table/summary", get(table::summary))
        .route("/api/table/data", get(table::data))
        .route("/api/table/filters", get(table::filters))
        .route("/api/table/sprints", get(table::sprints))
        .route("/api/table/refresh", post(table::refresh))
        .route("/api/dashboard/stats", get(dashboard::stats))
        .route(
            "/api/dashboard/status-distribution",
            get(dashboard::status_distribution),
        )
        .route("/api/sprint/progress", get(sprint::progress))
        .route("/api/sprint/burndown/{sprint}", get(sprint::burndown))
        .route("/api/sprint/info/{sprint}", get(sprint::info))
        .with_state(state)
}

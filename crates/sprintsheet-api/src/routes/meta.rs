//! Liveness and source health.

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    /// Greeting.
    pub message: String,
    /// Crate version.
    pub version: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `healthy` while the process serves requests.
    pub status: String,
    /// `ok`, or `error: <reason>` when the sheet cannot be loaded.
    pub google_sheets_connection: String,
    /// Source state after the check.
    pub source_state: String,
    /// Time of the check.
    pub timestamp: DateTime<Utc>,
}

pub(super) async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Sprintsheet API is running!".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let connection = match state.sheets().sheet().await {
        Ok(_) => "ok".to_string(),
        Err(e) => format!("error: {e}"),
    };
    Json(HealthResponse {
        status: "healthy".to_string(),
        google_sheets_connection: connection,
        source_state: state.sheets().handle().state().to_string(),
        timestamp: Utc::now(),
    })
}

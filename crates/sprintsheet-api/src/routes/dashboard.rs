//! `/api/dashboard/*` handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;
use sprintsheet_sprint::{DashboardStats, StatusDistribution};

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub(super) struct SprintFilter {
    sprint: Option<String>,
}

pub(super) async fn stats(
    State(state): State<AppState>,
    filter: std::result::Result<Query<SprintFilter>, QueryRejection>,
) -> Result<Json<DashboardStats>> {
    let Query(filter) = filter?;
    let sheet = state.sheets().sheet().await?;
    let issues = sprintsheet_sprint::issues(&sheet);
    Ok(Json(sprintsheet_sprint::dashboard_stats(
        &issues,
        filter.sprint.as_deref(),
        &state.sprint_rules(),
        sheet.fetched_at(),
    )))
}

pub(super) async fn status_distribution(
    State(state): State<AppState>,
    filter: std::result::Result<Query<SprintFilter>, QueryRejection>,
) -> Result<Json<StatusDistribution>> {
    let Query(filter) = filter?;
    let sheet = state.sheets().sheet().await?;
    let issues = sprintsheet_sprint::issues(&sheet);
    Ok(Json(sprintsheet_sprint::status_distribution(
        &issues,
        filter.sprint.as_deref(),
        sheet.fetched_at(),
    )))
}

//! `/api/sprint/*` handlers.

use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use sprintsheet_sprint::{Burndown, ProgressResponse, SprintCalendar, SprintInfo};

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub(super) struct ProgressQuery {
    sprint_name: Option<String>,
}

pub(super) async fn progress(
    State(state): State<AppState>,
    query: std::result::Result<Query<ProgressQuery>, QueryRejection>,
) -> Result<Json<ProgressResponse>> {
    let Query(query) = query?;
    let sheet = state.sheets().sheet().await?;
    let issues = sprintsheet_sprint::issues(&sheet);
    let progress = sprintsheet_sprint::sprint_progress(
        &issues,
        query.sprint_name.as_deref(),
        &state.sprint_rules(),
        state.today(),
        sheet.fetched_at(),
    )?;
    Ok(Json(progress.into()))
}

pub(super) async fn burndown(
    State(state): State<AppState>,
    sprint: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Burndown>> {
    let Path(sprint) = sprint?;
    let sheet = state.sheets().sheet().await?;
    let burndown =
        sprintsheet_sprint::sprint_burndown(state.config(), &sheet, &sprint, state.today())?;
    Ok(Json(burndown))
}

pub(super) async fn info(
    State(state): State<AppState>,
    sprint: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<SprintInfo>> {
    let Path(sprint) = sprint?;
    let sheet = state.sheets().sheet().await?;
    let issues = sprintsheet_sprint::issues(&sheet);
    let info = SprintCalendar::new(state.config(), &sheet).info(&sprint, &issues, state.today())?;
    Ok(Json(info))
}

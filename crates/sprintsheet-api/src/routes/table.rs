//! `/api/table/*` handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Serialize;
use sprintsheet_core::Sheet;
use sprintsheet_table::{FilterOptions, TablePage, TableQuery, TableSummary};

use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub(super) struct SprintList {
    sprints: Vec<String>,
}

fn summarize(state: &AppState, sheet: &Sheet) -> TableSummary {
    let config = &state.config().sheet;
    sprintsheet_table::summary(sheet, &config.sheet_id, &config.sheet_name)
}

pub(super) async fn summary(State(state): State<AppState>) -> Result<Json<TableSummary>> {
    let sheet = state.sheets().sheet().await?;
    Ok(Json(summarize(&state, &sheet)))
}

pub(super) async fn data(
    State(state): State<AppState>,
    query: std::result::Result<Query<TableQuery>, QueryRejection>,
) -> Result<Json<TablePage>> {
    let Query(query) = query?;
    let sheet = state.sheets().sheet().await?;
    let page = sprintsheet_table::query(&sheet, &query, &state.page_limits())?;
    Ok(Json(page))
}

pub(super) async fn filters(State(state): State<AppState>) -> Result<Json<FilterOptions>> {
    let sheet = state.sheets().sheet().await?;
    Ok(Json(sprintsheet_table::filter_options(&sheet)))
}

pub(super) async fn sprints(State(state): State<AppState>) -> Result<Json<SprintList>> {
    let sheet = state.sheets().sheet().await?;
    Ok(Json(SprintList {
        sprints: sprintsheet_table::sprint_names(&sheet),
    }))
}

pub(super) async fn refresh(State(state): State<AppState>) -> Result<Json<TableSummary>> {
    let sheet = state.sheets().refresh().await?;
    tracing::info!("Sheet refreshed on request: {} rows", sheet.len());
    Ok(Json(summarize(&state, &sheet)))
}

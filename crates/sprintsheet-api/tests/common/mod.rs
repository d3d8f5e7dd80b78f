//! Shared fixtures for HTTP tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::NaiveDate;
use serde_json::Value;
use sprintsheet_api::{AppState, router};
use sprintsheet_core::{Config, Error, Result};
use sprintsheet_sheets::{DEFAULT_TTL, ParseOptions, SheetService, SheetSource, StaticSource};
use tower::ServiceExt;

pub use sprintsheet_sheets::test_utils::ISSUES_CSV;

/// Source that always fails to fetch.
pub struct DownSource;

#[async_trait]
impl SheetSource for DownSource {
    async fn fetch(&self) -> Result<String> {
        Err(Error::fetch("HTTP 503 Service Unavailable"))
    }

    fn describe(&self) -> String {
        "down".to_string()
    }
}

/// Friday of the first week of Sprint 3.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.sheet.sheet_id = "test-sheet".to_string();
    config.sheet.sheet_name = "Issues".to_string();
    config
}

pub fn app_with(config: Config, source: Arc<dyn SheetSource>) -> Router {
    let sheets = SheetService::new(source, ParseOptions::from(&config.sheet), DEFAULT_TTL);
    let state = AppState::new(Arc::new(sheets), Arc::new(config)).with_today(today());
    router(state)
}

/// App serving [`ISSUES_CSV`].
pub fn app() -> Router {
    app_with(
        test_config(),
        Arc::new(StaticSource::new("fixture", ISSUES_CSV)),
    )
}

/// App whose source is unreachable.
pub fn down_app() -> Router {
    app_with(test_config(), Arc::new(DownSource))
}

pub async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri).await
}

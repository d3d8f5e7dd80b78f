//! Table, health, and error-mapping endpoints.

#![allow(clippy::unwrap_used)]

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use tower::ServiceExt;

use common::{app, down_app, get, send};

#[tokio::test]
async fn test_root() {
    let (status, json) = get(app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Sprintsheet API is running!");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_ok() {
    let (status, json) = get(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["google_sheets_connection"], "ok");
    assert_eq!(json["source_state"], "ready");
}

#[tokio::test]
async fn test_health_reports_source_failure() {
    let (status, json) = get(down_app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    let connection = json["google_sheets_connection"].as_str().unwrap();
    assert!(connection.starts_with("error: "));
    assert!(json["source_state"].as_str().unwrap().starts_with("failed"));
}

#[tokio::test]
async fn test_summary() {
    let (status, json) = get(app(), "/api/table/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sheet_id"], "test-sheet");
    assert_eq!(json["sheet_name"], "Issues");
    assert_eq!(json["total_rows"], 7);
    assert_eq!(json["total_columns"], 12);
    assert_eq!(json["columns"][0]["name"], "Key");
}

#[tokio::test]
async fn test_summary_source_down_is_503() {
    let (status, json) = get(down_app(), "/api/table/summary").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["category"], "source_unavailable");
}

#[tokio::test]
async fn test_data_defaults() {
    let (status, json) = get(app(), "/api/table/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 7);
    assert_eq!(json["data"][0]["key"], "PROJ-1");
    assert_eq!(json["pagination"]["current_page"], 1);
    assert_eq!(json["pagination"]["page_size"], 100);
    assert_eq!(json["pagination"]["total_records"], 7);
    assert_eq!(json["pagination"]["has_next"], false);
    assert!(json["filters"]["applied"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_data_filter_and_search() {
    let (_, json) = get(app(), "/api/table/data?status=Done").await;
    assert_eq!(json["pagination"]["total_records"], 3);
    assert_eq!(json["filters"]["applied"][0], "status");

    let (_, json) = get(app(), "/api/table/data?search=CRASH").await;
    assert_eq!(json["pagination"]["total_records"], 1);
    assert_eq!(json["data"][0]["key"], "PROJ-2");

    let (_, json) = get(app(), "/api/table/data?sprint=Sprint%203&status=All").await;
    assert_eq!(json["pagination"]["total_records"], 4);
}

#[tokio::test]
async fn test_data_sort_desc() {
    let (_, json) = get(app(), "/api/table/data?sort_by=Story%20Points&sort_order=desc").await;
    let points: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["story_points"].clone())
        .collect();
    assert_eq!(points[0], 8.0);
    // Rows without points sort last.
    assert!(points[6].is_null());
}

#[tokio::test]
async fn test_data_validation_errors() {
    let (status, json) = get(app(), "/api/table/data?page=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["category"], "validation");

    let (status, _) = get(app(), "/api/table/data?page_size=5000").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, json) = get(app(), "/api/table/data?page_size=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["category"], "validation");
}

#[tokio::test]
async fn test_filters() {
    let (status, json) = get(app(), "/api/table/filters").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["status"],
        serde_json::json!(["Closed", "Done", "In Progress", "To Do"])
    );
    assert_eq!(json["assignee"], serde_json::json!(["Data", "Mobile", "Web"]));
    assert_eq!(json["created_date_range"]["max"], "2025-01-20T09:00:00");
}

#[tokio::test]
async fn test_sprints() {
    let (status, json) = get(app(), "/api/table/sprints").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["sprints"],
        serde_json::json!(["Sprint 2", "Sprint 3", "Sprint 10"])
    );
}

#[tokio::test]
async fn test_refresh() {
    let (status, json) = send(app(), Method::POST, "/api/table/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_rows"], 7);

    let (status, _) = send(down_app(), Method::POST, "/api/table/refresh").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:3000"
    );

    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(
        !response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

//! End-to-end ingestion: file on disk → cached, typed sheet.

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use sprintsheet_core::config::{Config, SheetConfig};
use sprintsheet_core::{ColumnKind, IssueColumns, SourceState};
use sprintsheet_sheets::{DEFAULT_TTL, FileSource, ParseOptions, SheetService, StaticSource};

#[tokio::test]
async fn test_file_backed_service_types_columns() {
    let (_dir, path) = common::write_csv(common::ISSUES_CSV);
    let config = Config {
        sheet: SheetConfig {
            csv_path: Some(path),
            ..Default::default()
        },
        ..Default::default()
    };

    let service = SheetService::from_config(&config).unwrap();
    let sheet = service.sheet().await.unwrap();

    assert_eq!(sheet.len(), 7);
    assert_eq!(sheet.columns().len(), 12);
    let kinds: Vec<_> = sheet.columns().iter().map(|c| c.kind).collect();
    assert_eq!(kinds[6], ColumnKind::Number);
    assert_eq!(kinds[7], ColumnKind::Date);
    assert_eq!(kinds[10], ColumnKind::Date);
    assert_eq!(kinds[11], ColumnKind::String);

    let cols = IssueColumns::resolve(&sheet);
    let second = sheet.records().nth(1).unwrap();
    assert_eq!(second.text(cols.issue_type), Some("Bug"));
    assert_eq!(second.date(cols.resolved), None);
    assert!(second.date(cols.updated).is_some());

    assert_eq!(service.handle().state(), SourceState::Ready);
    assert!(service.handle().last_success().is_some());
}

#[tokio::test]
async fn test_missing_file_marks_source_failed() {
    let source = Arc::new(FileSource::new("/no/such/export.csv"));
    let service = SheetService::new(source, ParseOptions::default(), DEFAULT_TTL);

    let err = service.sheet().await.unwrap_err();
    assert!(err.is_retryable());
    let SourceState::Failed(reason) = service.handle().state() else {
        unreachable!("source should be marked failed")
    };
    assert!(reason.contains("export.csv"));
}

#[tokio::test]
async fn test_static_source_name_reaches_handle() {
    let source = Arc::new(StaticSource::new("fixture", common::ISSUES_CSV));
    let service = SheetService::new(source, ParseOptions::default(), DEFAULT_TTL);
    assert_eq!(service.handle().name(), "static:fixture");
    assert_eq!(service.handle().state(), SourceState::Unknown);
}

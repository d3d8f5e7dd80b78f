//! Shared fixtures for sheet ingestion tests.

#![allow(dead_code)]

/// The shared issue export fixture.
pub const ISSUES_CSV: &str = include_str!("../../fixtures/issues.csv");

/// Write `body` to a temporary CSV file, returning the directory guard and path.
pub fn write_csv(body: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("issues.csv");
    std::fs::write(&path, body).unwrap();
    let path = path.to_string_lossy().into_owned();
    (dir, path)
}

//! Sheet shape summary.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sprintsheet_core::{Column, Sheet};

/// Shape of the sheet and when it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    /// Spreadsheet id (empty for file sources).
    pub sheet_id: String,
    /// Tab name.
    pub sheet_name: String,
    /// Data rows, header excluded.
    pub total_rows: usize,
    /// Number of columns.
    pub total_columns: usize,
    /// Headers with their kinds.
    pub columns: Vec<Column>,
    /// Fetch time of the cached sheet.
    pub last_updated: DateTime<Utc>,
}

/// Summarize `sheet`.
pub fn summary(sheet: &Sheet, sheet_id: &str, sheet_name: &str) -> TableSummary {
    TableSummary {
        sheet_id: sheet_id.to_string(),
        sheet_name: sheet_name.to_string(),
        total_rows: sheet.len(),
        total_columns: sheet.columns().len(),
        columns: sheet.columns().to_vec(),
        last_updated: sheet.fetched_at(),
    }
}

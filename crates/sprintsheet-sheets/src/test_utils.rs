//! Issue-export fixture shared by the sprintsheet test suites.
//!
//! Enabled for this crate's unit tests and, for other crates, through the
//! `test-utils` feature.

use chrono::Utc;
use sprintsheet_core::config::SheetConfig;
use sprintsheet_core::{Result, Sheet};

use crate::parse::{ParseOptions, parse_csv};

/// Seven issues across Sprint 2, Sprint 3 and Sprint 10, plus one unplanned.
pub const ISSUES_CSV: &str = include_str!("../fixtures/issues.csv");

/// Parse `csv` with the default column kinds.
pub fn sheet_from(csv: &str) -> Result<Sheet> {
    parse_csv(csv, &ParseOptions::from(&SheetConfig::default()), Utc::now())
}

/// [`ISSUES_CSV`] parsed with the default column kinds.
pub fn fixture() -> Result<Sheet> {
    sheet_from(ISSUES_CSV)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let sheet = fixture().unwrap();
        assert_eq!(sheet.len(), 7);
        assert_eq!(sheet.columns().len(), 12);
    }
}

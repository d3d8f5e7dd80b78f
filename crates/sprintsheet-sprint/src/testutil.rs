//! Fixture sheet for unit tests.

use sprintsheet_core::Sheet;

#[allow(clippy::unwrap_used)]
pub fn sheet_from(csv: &str) -> Sheet {
    sprintsheet_sheets::test_utils::sheet_from(csv).unwrap()
}

#[allow(clippy::unwrap_used)]
pub fn fixture() -> Sheet {
    sprintsheet_sheets::test_utils::fixture().unwrap()
}

//! Filter option lists.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sprintsheet_core::sheet::headers;
use sprintsheet_core::util::fields::natural_cmp;
use sprintsheet_core::Sheet;

/// Earliest and latest `Created` timestamps.
///
/// Serializes as `{}` when the sheet has no creation dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<NaiveDateTime>,
    /// Latest timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<NaiveDateTime>,
}

impl DateRange {
    /// Widen the range to include `value`.
    pub fn include(&mut self, value: NaiveDateTime) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }
}

/// Distinct values a client can filter on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Sorted distinct statuses.
    pub status: Vec<String>,
    /// Sorted distinct priorities.
    pub priority: Vec<String>,
    /// Sorted distinct assignees (or projects when the export has no
    /// assignee column).
    pub assignee: Vec<String>,
    /// Range of creation dates.
    pub created_date_range: DateRange,
}

/// Collect filter options from `sheet`. Missing columns give empty lists.
pub fn filter_options(sheet: &Sheet) -> FilterOptions {
    let assignee_col = sheet
        .column_index(headers::ASSIGNEE)
        .or_else(|| sheet.column_index(headers::PROJECTS));
    let created_col = sheet.column_index(headers::CREATED);

    let mut range = DateRange::default();
    for date in sheet.records().filter_map(|r| r.date(created_col)) {
        range.include(date);
    }

    FilterOptions {
        status: distinct(sheet, headers::STATUS).into_iter().collect(),
        priority: distinct(sheet, headers::PRIORITY).into_iter().collect(),
        assignee: distinct_at(sheet, assignee_col).into_iter().collect(),
        created_date_range: range,
    }
}

/// Distinct non-empty sprint labels in natural order.
pub fn sprint_names(sheet: &Sheet) -> Vec<String> {
    let mut names: Vec<String> = distinct(sheet, headers::SPRINT).into_iter().collect();
    names.sort_by(|a, b| natural_cmp(a, b));
    names
}

fn distinct(sheet: &Sheet, header: &str) -> BTreeSet<String> {
    distinct_at(sheet, sheet.column_index(header))
}

fn distinct_at(sheet: &Sheet, column: Option<usize>) -> BTreeSet<String> {
    if column.is_none() {
        return BTreeSet::new();
    }
    sheet
        .records()
        .filter_map(|r| r.text(column))
        .map(str::to_string)
        .collect()
}

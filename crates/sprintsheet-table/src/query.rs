//! Paginated, filtered, sorted table data.
//!
//! The pipeline is search → filters → sort → paginate. Sorting is stable and
//! keeps empty cells at the end regardless of direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sprintsheet_core::config::ServerConfig;
use sprintsheet_core::sheet::headers;
use sprintsheet_core::{CellValue, Error, Record, Result, Sheet};

use crate::options::filter_options;

/// Smallest accepted page size.
pub const MIN_PAGE_SIZE: usize = 10;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Page size bounds for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    /// Used when a query leaves `page_size` unset.
    pub default_page_size: usize,
    /// Largest accepted `page_size`.
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 100,
            max_page_size: 1000,
        }
    }
}

impl From<&ServerConfig> for PageLimits {
    fn from(config: &ServerConfig) -> Self {
        Self {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        }
    }
}

/// Table data request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableQuery {
    /// 1-based page number.
    pub page: usize,
    /// Rows per page; `None` uses [`PageLimits::default_page_size`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    /// Column header or field name to sort by.
    pub sort_by: String,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Case-insensitive substring matched against text cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact `Status` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Exact `Priority` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Exact `Sprint` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: None,
            sort_by: headers::KEY.to_string(),
            sort_order: SortOrder::Asc,
            search: None,
            status: None,
            priority: None,
            sprint: None,
        }
    }
}

impl TableQuery {
    /// Effective page size under `limits`.
    pub fn effective_page_size(&self, limits: &PageLimits) -> usize {
        self.page_size.unwrap_or(limits.default_page_size)
    }

    /// Reject out-of-range paging parameters.
    pub fn validate(&self, limits: &PageLimits) -> Result<()> {
        if self.page < 1 {
            return Err(Error::validation_field("page", "page must be >= 1"));
        }
        let size = self.effective_page_size(limits);
        if !(MIN_PAGE_SIZE..=limits.max_page_size).contains(&size) {
            return Err(Error::validation_field(
                "page_size",
                format!(
                    "page_size must be between {MIN_PAGE_SIZE} and {}",
                    limits.max_page_size
                ),
            ));
        }
        Ok(())
    }

    /// Names of the filters this query applies.
    pub fn applied_filters(&self) -> Vec<String> {
        [
            ("status", &self.status),
            ("priority", &self.priority),
            ("sprint", &self.sprint),
        ]
        .into_iter()
        .filter(|(_, value)| active_filter(value.as_deref()).is_some())
        .map(|(name, _)| name.to_string())
        .collect()
    }
}

/// Returns `true` when a filter value means "no filter" (`All` or blank).
pub fn is_all(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("all")
}

fn active_filter(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !is_all(v)).map(str::trim)
}

// ============================================================================
// Response types
// ============================================================================

/// Paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Requested page.
    pub current_page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Number of pages for the filtered rows.
    pub total_pages: usize,
    /// Number of rows after search and filters.
    pub total_records: usize,
    /// A later page exists.
    pub has_next: bool,
    /// An earlier page exists.
    pub has_prev: bool,
}

impl PaginationInfo {
    /// Compute paging for `total_records` rows.
    pub fn new(current_page: usize, page_size: usize, total_records: usize) -> Self {
        let total_pages = total_records.div_ceil(page_size.max(1));
        Self {
            current_page,
            page_size,
            total_pages,
            total_records,
            has_next: current_page < total_pages,
            has_prev: current_page > 1,
        }
    }

    /// Zero-based index of the first row on the current page.
    pub fn offset(&self) -> usize {
        self.current_page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }
}

/// Values a client may filter by.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AvailableFilters {
    /// Distinct statuses.
    pub status: Vec<String>,
    /// Distinct priorities.
    pub priority: Vec<String>,
}

/// Filters applied to this page and those available.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterInfo {
    /// Names of the applied filters.
    pub applied: Vec<String>,
    /// Filter values present in the sheet.
    pub available: AvailableFilters,
}

/// One page of table data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage {
    /// Rows keyed by field name.
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
    /// Paging metadata.
    pub pagination: PaginationInfo,
    /// Filter metadata.
    pub filters: FilterInfo,
}

// ============================================================================
// Query execution
// ============================================================================

/// Run `q` against `sheet`.
pub fn query(sheet: &Sheet, q: &TableQuery, limits: &PageLimits) -> Result<TablePage> {
    q.validate(limits)?;
    let page_size = q.effective_page_size(limits);

    let status_col = sheet.column_index(headers::STATUS);
    let priority_col = sheet.column_index(headers::PRIORITY);
    let sprint_col = sheet.column_index(headers::SPRINT);

    let needle = q
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let exact = [
        (status_col, active_filter(q.status.as_deref())),
        (priority_col, active_filter(q.priority.as_deref())),
        (sprint_col, active_filter(q.sprint.as_deref())),
    ];

    let mut rows: Vec<Record<'_>> = sheet
        .records()
        .filter(|record| needle.as_deref().is_none_or(|n| matches_search(record, n)))
        .filter(|record| {
            exact.iter().all(|(column, wanted)| match wanted {
                Some(wanted) => record.text(*column) == Some(*wanted),
                None => true,
            })
        })
        .collect();

    if let Some(column) = sheet.column_index(&q.sort_by) {
        sort_records(&mut rows, column, q.sort_order);
    }

    let pagination = PaginationInfo::new(q.page, page_size, rows.len());
    let data = rows
        .iter()
        .skip(pagination.offset())
        .take(page_size)
        .map(|record| record.to_json_object(sheet.columns()))
        .collect();

    let options = filter_options(sheet);
    let filters = FilterInfo {
        applied: q.applied_filters(),
        available: AvailableFilters {
            status: options.status,
            priority: options.priority,
        },
    };

    tracing::debug!(
        "Table query page {} of {}: {} matching rows",
        pagination.current_page,
        pagination.total_pages,
        pagination.total_records
    );

    Ok(TablePage {
        data,
        pagination,
        filters,
    })
}

/// Case-insensitive substring match against text cells; `needle` is lowercase.
fn matches_search(record: &Record<'_>, needle: &str) -> bool {
    record.cells().iter().any(|cell| match cell {
        CellValue::Text(text) => text.to_lowercase().contains(needle),
        _ => false,
    })
}

/// Stable sort on one column. Empty cells sort last in both directions.
fn sort_records(rows: &mut [Record<'_>], column: usize, order: SortOrder) {
    rows.sort_by(|a, b| {
        let (a, b) = (a.cell(Some(column)), b.cell(Some(column)));
        match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_cells(a, b);
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            }
        }
    });
}

fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        // Mixed kinds only occur in number columns holding stray text.
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(cell: &CellValue) -> u8 {
    match cell {
        CellValue::Number(_) => 0,
        CellValue::Date(_) => 1,
        CellValue::Text(_) => 2,
        CellValue::Empty => 3,
    }
}

// ============================================================================
// Tests
// ============================================================================

//! In-memory model of a fetched sheet.
//!
//! A [`Sheet`] is a header row plus typed cells. Column kinds are decided at
//! parse time from configuration; cells that fail to parse as their column's
//! kind are coerced (dates become [`CellValue::Empty`], numbers stay text).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::util::fields::field_name;

/// ISO-8601 rendering used for date cells (no offset, second precision).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Well-known headers of the issue tracker export.
pub mod headers {
    /// Issue key ("PROJ-123").
    pub const KEY: &str = "Key";
    /// Issue type ("Story", "Bug").
    pub const ISSUE_TYPE: &str = "Issue Type";
    /// Workflow status.
    pub const STATUS: &str = "Status";
    /// Priority.
    pub const PRIORITY: &str = "Priority";
    /// Sprint label.
    pub const SPRINT: &str = "Sprint";
    /// Story point estimate.
    pub const STORY_POINTS: &str = "Story Points";
    /// Creation timestamp.
    pub const CREATED: &str = "Created";
    /// Last update timestamp.
    pub const UPDATED: &str = "Updated";
    /// Resolution timestamp.
    pub const RESOLVED: &str = "Resolved";
    /// Due date.
    pub const DUE_DATE: &str = "Due date";
    /// Assignee (not present in every export).
    pub const ASSIGNEE: &str = "Assignee";
    /// Project list.
    pub const PROJECTS: &str = "Projects";
}

// ============================================================================
// Cells and columns
// ============================================================================

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank or coerced-away value.
    Empty,
    /// Free text.
    Text(String),
    /// Numeric value from a number column.
    Number(f64),
    /// Timestamp from a date column.
    Date(NaiveDateTime),
}

impl CellValue {
    /// Returns `true` for [`CellValue::Empty`].
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Trimmed text, or `None` for non-text and blank cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.trim()).filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    /// Numeric value, or `None` for non-number cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Timestamp, or `None` for non-date cells.
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// JSON value of this cell, matching its [`Serialize`] output.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            Self::Empty => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
            Self::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            Self::Number(_) => serializer.serialize_none(),
            Self::Date(d) => serializer.collect_str(&d.format(DATE_FORMAT)),
        }
    }
}

/// Declared type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Free text.
    #[default]
    String,
    /// Numeric.
    Number,
    /// Timestamp.
    Date,
}

/// A column header and its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Raw header text.
    pub name: String,
    /// Declared kind.
    #[serde(rename = "type")]
    pub kind: ColumnKind,
}

impl Column {
    /// Create a column.
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// JSON field name for this column.
    pub fn field_name(&self) -> String {
        field_name(&self.name)
    }
}

// ============================================================================
// Sheet
// ============================================================================

/// A fetched and parsed sheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
    fetched_at: DateTime<Utc>,
}

impl Sheet {
    /// Create a sheet. Rows are padded or truncated to the column count.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>, fetched_at: DateTime<Utc>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, CellValue::Empty);
                row
            })
            .collect();
        Self {
            columns,
            rows,
            fetched_at,
        }
    }

    /// Column headers in sheet order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// When the sheet was fetched from its source.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Iterate over rows as [`Record`] views.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|cells| Record { cells })
    }

    /// Resolve a column by exact header, then by field name.
    ///
    /// `"Due date"`, `"due_date"` and `"DUE DATE"` all resolve to the same
    /// column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        if let Some(idx) = self.columns.iter().position(|c| c.name == name) {
            return Some(idx);
        }
        let wanted = field_name(name.trim());
        self.columns.iter().position(|c| c.field_name() == wanted)
    }
}

/// Borrowed view of one sheet row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    cells: &'a [CellValue],
}

impl<'a> Record<'a> {
    /// All cells in column order.
    pub fn cells(&self) -> &'a [CellValue] {
        self.cells
    }

    /// Cell at a resolved column, `Empty` when the column is absent.
    pub fn cell(&self, column: Option<usize>) -> &'a CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        column.and_then(|idx| self.cells.get(idx)).unwrap_or(EMPTY)
    }

    /// Trimmed text at a resolved column.
    pub fn text(&self, column: Option<usize>) -> Option<&'a str> {
        self.cell(column).as_text()
    }

    /// Number at a resolved column.
    pub fn number(&self, column: Option<usize>) -> Option<f64> {
        self.cell(column).as_number()
    }

    /// Timestamp at a resolved column.
    pub fn date(&self, column: Option<usize>) -> Option<NaiveDateTime> {
        self.cell(column).as_date()
    }

    /// The row as a JSON object keyed by each column's field name.
    pub fn to_json_object(&self, columns: &[Column]) -> serde_json::Map<String, serde_json::Value> {
        columns
            .iter()
            .zip(self.cells)
            .map(|(column, cell)| (column.field_name(), cell.to_json()))
            .collect()
    }
}

/// Column positions of the well-known issue headers, resolved once per sheet.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueColumns {
    /// `Key`
    pub key: Option<usize>,
    /// `Issue Type`
    pub issue_type: Option<usize>,
    /// `Status`
    pub status: Option<usize>,
    /// `Priority`
    pub priority: Option<usize>,
    /// `Sprint`
    pub sprint: Option<usize>,
    /// `Story Points`
    pub story_points: Option<usize>,
    /// `Created`
    pub created: Option<usize>,
    /// `Updated`
    pub updated: Option<usize>,
    /// `Resolved`
    pub resolved: Option<usize>,
    /// `Due date`
    pub due_date: Option<usize>,
}

impl IssueColumns {
    /// Resolve all well-known headers against a sheet.
    pub fn resolve(sheet: &Sheet) -> Self {
        Self {
            key: sheet.column_index(headers::KEY),
            issue_type: sheet.column_index(headers::ISSUE_TYPE),
            status: sheet.column_index(headers::STATUS),
            priority: sheet.column_index(headers::PRIORITY),
            sprint: sheet.column_index(headers::SPRINT),
            story_points: sheet.column_index(headers::STORY_POINTS),
            created: sheet.column_index(headers::CREATED),
            updated: sheet.column_index(headers::UPDATED),
            resolved: sheet.column_index(headers::RESOLVED),
            due_date: sheet.column_index(headers::DUE_DATE),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn sample() -> Sheet {
        Sheet::new(
            vec![
                Column::new("Key", ColumnKind::String),
                Column::new("Due date", ColumnKind::Date),
                Column::new("Story Points", ColumnKind::Number),
            ],
            vec![
                vec![
                    CellValue::Text("A-1".into()),
                    CellValue::Date(dt(2025, 1, 6)),
                    CellValue::Number(3.0),
                ],
                vec![CellValue::Text("A-2".into())],
            ],
            Utc::now(),
        )
    }

    #[test]
    fn test_rows_padded_to_width() {
        let sheet = sample();
        let second = sheet.records().nth(1).unwrap();
        assert_eq!(second.cells().len(), 3);
        assert!(second.cell(Some(2)).is_empty());
    }

    #[test]
    fn test_column_index_by_header_and_field_name() {
        let sheet = sample();
        assert_eq!(sheet.column_index("Due date"), Some(1));
        assert_eq!(sheet.column_index("due_date"), Some(1));
        assert_eq!(sheet.column_index("STORY POINTS"), Some(2));
        assert_eq!(sheet.column_index("Missing"), None);
    }

    #[test]
    fn test_record_accessors() {
        let sheet = sample();
        let cols = IssueColumns::resolve(&sheet);
        let first = sheet.records().next().unwrap();
        assert_eq!(first.text(cols.key), Some("A-1"));
        assert_eq!(first.number(cols.story_points), Some(3.0));
        assert_eq!(first.date(cols.due_date), Some(dt(2025, 1, 6)));
        assert_eq!(first.text(cols.status), None);
    }

    #[test]
    fn test_cell_serialization() {
        assert_eq!(serde_json::to_string(&CellValue::Empty).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&CellValue::Text("x".into())).unwrap(),
            "\"x\""
        );
        assert_eq!(serde_json::to_string(&CellValue::Number(2.5)).unwrap(), "2.5");
        assert_eq!(
            serde_json::to_string(&CellValue::Date(dt(2025, 1, 6))).unwrap(),
            "\"2025-01-06T10:00:00\""
        );
        assert_eq!(
            serde_json::to_string(&CellValue::Number(f64::NAN)).unwrap(),
            "null"
        );
    }

    #[test]
    fn test_to_json_matches_serialize() {
        for cell in [
            CellValue::Empty,
            CellValue::Text("PROJ-1".into()),
            CellValue::Number(5.0),
            CellValue::Number(f64::INFINITY),
            CellValue::Date(dt(2025, 1, 17)),
        ] {
            assert_eq!(cell.to_json(), serde_json::to_value(&cell).unwrap());
        }
    }

    #[test]
    fn test_record_to_json_object() {
        let sheet = sample();
        let first = sheet.records().next().unwrap();
        let obj = first.to_json_object(sheet.columns());
        assert_eq!(obj["key"], "A-1");
        assert_eq!(obj["due_date"], "2025-01-06T10:00:00");
        assert_eq!(obj["story_points"], 3.0);
    }

    #[test]
    fn test_blank_text_is_none() {
        assert_eq!(CellValue::Text("   ".into()).as_text(), None);
        assert_eq!(CellValue::Text(" Done ".into()).as_text(), Some("Done"));
    }

    #[test]
    fn test_column_serialization() {
        let col = Column::new("Created", ColumnKind::Date);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json["name"], "Created");
        assert_eq!(json["type"], "date");
    }
}

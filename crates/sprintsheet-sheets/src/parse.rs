//! CSV body → typed [`Sheet`].
//!
//! Column kinds come from configuration. Date cells that match none of the
//! accepted formats become empty; number cells that do not parse keep their
//! text.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sprintsheet_core::config::SheetConfig;
use sprintsheet_core::util::fields::matches_any;
use sprintsheet_core::{CellValue, Column, ColumnKind, Error, Result, Sheet};

/// Timestamp formats tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    // Jira export: "06/Jan/25 10:00 AM"
    "%d/%b/%y %I:%M %p",
];

/// Date-only formats tried after [`DATETIME_FORMATS`].
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%b/%y"];

/// Which headers are typed as dates and numbers.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Headers parsed as dates.
    pub date_columns: Vec<String>,
    /// Headers parsed as numbers.
    pub number_columns: Vec<String>,
}

impl ParseOptions {
    /// Kind of the column named `header`.
    pub fn kind_of(&self, header: &str) -> ColumnKind {
        if matches_any(header, &self.date_columns) {
            ColumnKind::Date
        } else if matches_any(header, &self.number_columns) {
            ColumnKind::Number
        } else {
            ColumnKind::String
        }
    }
}

impl From<&SheetConfig> for ParseOptions {
    fn from(config: &SheetConfig) -> Self {
        Self {
            date_columns: config.date_columns.clone(),
            number_columns: config.number_columns.clone(),
        }
    }
}

/// Parse a CSV body. The first record is the header row.
pub fn parse_csv(body: &str, options: &ParseOptions, fetched_at: DateTime<Utc>) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let columns: Vec<Column> = reader
        .headers()
        .map_err(|e| Error::parse(format!("invalid CSV header: {e}")))?
        .iter()
        .map(|h| {
            let name = h.trim();
            Column::new(name, options.kind_of(name))
        })
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        // Header is line 1.
        let record = record.map_err(|e| Error::parse(format!("row {}: {e}", idx + 2)))?;
        let row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, raw)| parse_cell(raw, column.kind))
            .collect();
        rows.push(row);
    }

    Ok(Sheet::new(columns, rows, fetched_at))
}

/// Convert one raw field according to its column kind.
pub fn parse_cell(raw: &str, kind: ColumnKind) -> CellValue {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match kind {
        ColumnKind::String => CellValue::Text(raw.to_string()),
        ColumnKind::Number => match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(raw.to_string()),
        },
        ColumnKind::Date => parse_date(trimmed).map_or(CellValue::Empty, CellValue::Date),
    }
}

/// Parse a timestamp in any accepted format.
///
/// Offsets are dropped; the wall-clock time as written is kept.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Some(dt) = parse_gviz_date(value) {
        return Some(dt);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
    {
        return Some(dt);
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
        .map(|d| d.and_time(NaiveTime::MIN))
}

/// Google's `Date(2025,0,6,10,0,0)` literal; the month is zero-based.
fn parse_gviz_date(value: &str) -> Option<NaiveDateTime> {
    let inner = value.strip_prefix("Date(")?.strip_suffix(')')?;
    let parts = inner
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .ok()?;
    let [year, month0, day, rest @ ..] = parts.as_slice() else {
        return None;
    };
    let at = |i: usize| rest.get(i).copied().unwrap_or(0);
    NaiveDate::from_ymd_opt(i32::try_from(*year).ok()?, month0.checked_add(1)?, *day)?.and_hms_opt(
        at(0),
        at(1),
        at(2),
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn options() -> ParseOptions {
        ParseOptions::from(&SheetConfig::default())
    }

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = ymd_hms(2025, 1, 6, 10, 0, 0);
        for input in [
            "2025-01-06T10:00:00",
            "2025-01-06 10:00:00",
            "2025-01-06 10:00",
            "2025/01/06 10:00:00",
            "01/06/2025 10:00",
            "06/Jan/25 10:00 AM",
            "2025-01-06T10:00:00+02:00",
            "Date(2025,0,6,10,0,0)",
        ] {
            assert_eq!(parse_date(input), Some(expected), "input {input}");
        }
    }

    #[test]
    fn test_parse_date_only() {
        let midnight = ymd_hms(2025, 1, 6, 0, 0, 0);
        assert_eq!(parse_date("2025-01-06"), Some(midnight));
        assert_eq!(parse_date("2025/01/06"), Some(midnight));
        assert_eq!(parse_date("1/6/2025"), Some(midnight));
        assert_eq!(parse_date("Date(2025,0,6)"), Some(midnight));
    }

    #[test]
    fn test_parse_date_pm_and_fraction() {
        assert_eq!(
            parse_date("17/Feb/25 3:45 PM"),
            Some(ymd_hms(2025, 2, 17, 15, 45, 0))
        );
        assert_eq!(
            parse_date("2025-01-06T10:00:00.250"),
            Some(
                NaiveDate::from_ymd_opt(2025, 1, 6)
                    .unwrap()
                    .and_hms_milli_opt(10, 0, 0, 250)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("next tuesday"), None);
        assert_eq!(parse_date("2025-13-40"), None);
        assert_eq!(parse_date("Date(2025,11,32)"), None);
        assert_eq!(parse_date("Date(2025,4294967295,1)"), None);
        assert_eq!(parse_date("Date(4294967295,0,1)"), None);
    }

    #[test]
    fn test_parse_cell_coercion() {
        assert_eq!(parse_cell("  ", ColumnKind::String), CellValue::Empty);
        assert_eq!(parse_cell("soon", ColumnKind::Date), CellValue::Empty);
        assert_eq!(parse_cell(" 5 ", ColumnKind::Number), CellValue::Number(5.0));
        assert_eq!(
            parse_cell("L", ColumnKind::Number),
            CellValue::Text("L".into())
        );
        assert_eq!(
            parse_cell("NaN", ColumnKind::Number),
            CellValue::Text("NaN".into())
        );
    }

    #[test]
    fn test_kind_of_uses_config_lists() {
        let opts = options();
        assert_eq!(opts.kind_of("Due date"), ColumnKind::Date);
        assert_eq!(opts.kind_of("Story Points"), ColumnKind::Number);
        assert_eq!(opts.kind_of("Summary"), ColumnKind::String);
    }

    #[test]
    fn test_parse_csv_types_and_padding() {
        let body = "Key,Status,Story Points,Created\n\
                    A-1,Done,3,2025-01-06\n\
                    A-2,\"In Progress, blocked\"\n";
        let sheet = parse_csv(body, &options(), Utc::now()).unwrap();

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.columns()[2].kind, ColumnKind::Number);
        assert_eq!(sheet.columns()[3].kind, ColumnKind::Date);

        let rows: Vec<_> = sheet.records().collect();
        assert_eq!(rows[0].number(Some(2)), Some(3.0));
        assert_eq!(rows[1].text(Some(1)), Some("In Progress, blocked"));
        assert!(rows[1].cell(Some(3)).is_empty());
    }

    #[test]
    fn test_parse_csv_drops_extra_fields() {
        let sheet = parse_csv("Key\nA-1,extra\n", &options(), Utc::now()).unwrap();
        let first = sheet.records().next().unwrap();
        assert_eq!(first.cells().len(), 1);
    }

    #[test]
    fn test_parse_csv_out_of_range_gviz_date_is_empty() {
        let body = "Key,Created\nA-1,\"Date(2025,4294967295,1)\"\n";
        let sheet = parse_csv(body, &options(), Utc::now()).unwrap();
        let row = sheet.records().next().unwrap();
        assert!(row.cell(Some(1)).is_empty());
    }

    #[test]
    fn test_parse_csv_empty_body() {
        let sheet = parse_csv("", &options(), Utc::now()).unwrap();
        assert!(sheet.is_empty());
        assert!(sheet.columns().is_empty());
    }

    #[test]
    fn test_parse_csv_trims_headers() {
        let sheet = parse_csv(" Key , Due date \nA-1,2025-01-06\n", &options(), Utc::now()).unwrap();
        assert_eq!(sheet.columns()[1].name, "Due date");
        assert_eq!(sheet.columns()[1].kind, ColumnKind::Date);
    }
}

//! Google Sheets ingestion for sprintsheet.
//!
//! - [`source`]: where the CSV body comes from
//! - [`parse`]: CSV → typed [`Sheet`](sprintsheet_core::Sheet)
//! - [`cache`]: TTL cache and source health tracking
//! - `test_utils`: shared issue fixture (`test-utils` feature)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cache;
pub mod parse;
pub mod source;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cache::{DEFAULT_TTL, SheetService};
pub use parse::{ParseOptions, parse_csv, parse_date};
pub use source::{FileSource, GvizSource, SheetSource, StaticSource, source_from_config};

//! Table views over a parsed sheet.
//!
//! # Modules
//!
//! - [`query`]: search, filters, sort, and pagination
//! - [`options`]: filter option lists and the sprint list
//! - [`summary`]: sheet shape summary

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod options;
pub mod query;
pub mod summary;

#[cfg(test)]
mod testutil;

pub use options::{DateRange, FilterOptions, filter_options, sprint_names};
pub use query::{
    FilterInfo, PageLimits, PaginationInfo, SortOrder, TablePage, TableQuery, is_all, query,
};
pub use summary::{TableSummary, summary};

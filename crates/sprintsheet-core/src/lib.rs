//! Shared types, configuration, errors, and utilities for sprintsheet.
//!
//! This crate provides the foundational types used across all sprintsheet
//! crates. It has no internal sprintsheet dependencies.
//!
//! # Modules
//!
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: Error types and Result alias
//! - [`service`]: Health state of the sheet source
//! - [`sheet`]: Typed in-memory sheet model
//! - [`util`]: Header normalization and path resolution

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod service;
pub mod sheet;
pub mod util;

// Re-export key types at crate root for convenience
pub use config::{Config, SprintCalendarEntry};
pub use error::{Error, Result};
pub use service::{SourceHandle, SourceState};
pub use sheet::{CellValue, Column, ColumnKind, IssueColumns, Record, Sheet};
pub use util::fields::{field_name, natural_cmp};
pub use util::resolver::PathResolver;

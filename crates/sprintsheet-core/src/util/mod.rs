//! Utility modules for header normalization and config path resolution.
//!
//! # Modules
//!
//! - [`fields`]: Header → field name conversion and natural label ordering
//! - [`resolver`]: Config file path resolution

pub mod fields;
pub mod resolver;

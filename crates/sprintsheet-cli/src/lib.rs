//! # sprintsheet-cli
//!
//! Command-line interface for sprintsheet.
//!
//! - `serve`: run the HTTP API
//! - `summary`, `progress`, `burndown`: print reports as JSON
//! - `config`: inspect and initialize the config file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config_handlers;
pub mod logging;

pub use cli::{Cli, Command, ConfigAction};

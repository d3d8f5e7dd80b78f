//! # sprintsheet-api
//!
//! HTTP API server for sprintsheet.
//!
//! Serves the cached sheet as paginated table data and exposes sprint
//! metrics (progress, burndown, dashboard stats) as JSON.
//!
//! # Modules
//!
//! - [`error`]: `ApiError` and its JSON response mapping
//! - [`state`]: shared handler state
//! - [`routes`]: the route table
//! - [`server`]: CORS, tracing, and the serve loop

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, Result};
pub use routes::{HealthResponse, RootResponse, api_routes};
pub use server::{bind_addr, cors_layer, router, serve};
pub use state::AppState;

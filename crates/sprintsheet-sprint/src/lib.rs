//! Sprint metrics over an issue export.
//!
//! Working days exclude Saturdays and Sundays and are counted over half-open
//! ranges `[start, end)`. The burndown and health classification build on
//! that count.
//!
//! # Modules
//!
//! - [`workdays`]: working-day arithmetic
//! - [`health`]: schedule health and rounding helpers
//! - [`issues`]: issue rows and done/bug rules
//! - [`burndown`]: ideal and actual burn lines
//! - [`calendar`]: sprint ids, windows, and states
//! - [`progress`]: completion, status breakdown, and bugs
//! - [`dashboard`]: headline stats and status distribution

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod burndown;
pub mod calendar;
pub mod dashboard;
pub mod health;
pub mod issues;
pub mod progress;
pub mod workdays;

#[cfg(test)]
mod testutil;

pub use burndown::{
    Burndown, ChartDataPoint, DayProgress, SprintBurndownData, SprintWindow, burndown,
    ideal_remaining, sprint_burndown,
};
pub use calendar::{SprintCalendar, SprintInfo, sprint_state};
pub use dashboard::{DashboardStats, StatusDistribution, dashboard_stats, status_distribution};
pub use health::{SprintStatus, completion_rate, expected_completion};
pub use issues::{Issue, SprintRules, issues, select};
pub use progress::{
    BugInfo, PROGRESS_MESSAGE, ProgressResponse, SprintProgress, StatusCount, most_recent_sprint,
    sprint_progress,
};
pub use workdays::{is_working_day, nth_working_day, working_day_dates, working_days};

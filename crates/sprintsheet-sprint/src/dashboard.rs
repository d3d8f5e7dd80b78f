//! Dashboard headline numbers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::issues::{Issue, SprintRules, select};
use crate::progress::{StatusCount, status_counts};

/// Issue and story point totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Issues in scope.
    pub total_issues: usize,
    /// Sum of story points in scope.
    pub total_story_points: f64,
    /// Done issues.
    pub done_issues: usize,
    /// Sum of story points of done issues.
    pub done_story_points: f64,
    /// Fetch time of the underlying sheet.
    pub last_updated: DateTime<Utc>,
}

/// Issues per status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusDistribution {
    /// One entry per status, largest first.
    pub distribution: Vec<StatusCount>,
    /// Issues in scope.
    pub total_count: usize,
    /// Fetch time of the underlying sheet.
    pub last_updated: DateTime<Utc>,
}

/// Totals over `issues`, restricted to `sprint` unless it is `None`, blank,
/// or `All`.
pub fn dashboard_stats(
    issues: &[Issue],
    sprint: Option<&str>,
    rules: &SprintRules,
    last_updated: DateTime<Utc>,
) -> DashboardStats {
    let selected = select(issues, sprint);
    let (done_issues, done_story_points) = selected
        .iter()
        .filter(|i| rules.is_done(i))
        .fold((0, 0.0), |(n, points), i| (n + 1, points + i.story_points));

    DashboardStats {
        total_issues: selected.len(),
        total_story_points: selected.iter().map(|i| i.story_points).sum(),
        done_issues,
        done_story_points,
        last_updated,
    }
}

/// Status distribution over `issues`, with the same sprint scoping as
/// [`dashboard_stats`].
pub fn status_distribution(
    issues: &[Issue],
    sprint: Option<&str>,
    last_updated: DateTime<Utc>,
) -> StatusDistribution {
    let selected = select(issues, sprint);
    StatusDistribution {
        distribution: status_counts(&selected),
        total_count: selected.len(),
        last_updated,
    }
}

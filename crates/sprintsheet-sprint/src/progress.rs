//! Sprint progress: completion, status breakdown, and bugs.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use sprintsheet_core::{Error, Result};

use crate::health::{completion_rate, round2};
use crate::issues::{Issue, SprintRules, select};
use crate::workdays::working_days;

/// Message attached to successful progress responses.
pub const PROGRESS_MESSAGE: &str = "Sprint progress retrieved successfully";

/// Label used for blank statuses and priorities.
const UNKNOWN: &str = "Unknown";

/// Count and share of one status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    /// Status value.
    pub status: String,
    /// Issues with this status.
    pub count: usize,
    /// Share of all counted issues, in percent.
    pub percentage: f64,
}

/// Bug statistics for a sprint.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BugInfo {
    /// Number of bugs.
    pub total_bugs: usize,
    /// Bugs per priority.
    pub bugs_by_severity: BTreeMap<String, usize>,
    /// Bugs per status.
    pub bugs_by_status: Vec<StatusCount>,
}

/// Progress of one sprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintProgress {
    /// Sprint label.
    pub sprint_name: String,
    /// Issues in the sprint, all types.
    pub total_stories: usize,
    /// Done issues.
    pub completed_stories: usize,
    /// Done share of issues, in percent.
    pub completion_percentage: f64,
    /// Sum of story points.
    pub total_story_points: f64,
    /// Sum of story points of done issues.
    pub completed_story_points: f64,
    /// Done share of story points, in percent.
    pub story_points_completion_percentage: f64,
    /// Working days from today to the sprint end; `None` without an end.
    pub remaining_work_days: Option<u32>,
    /// Latest due date in the sprint.
    pub sprint_end_date: Option<NaiveDateTime>,
    /// Issues per status, largest first.
    pub status_breakdown: Vec<StatusCount>,
    /// Bug statistics.
    pub bug_info: BugInfo,
    /// Fetch time of the underlying sheet.
    pub last_updated: DateTime<Utc>,
}

/// `{success, data, message}` wrapper returned by the progress endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressResponse {
    /// Always `true`; failures use the error body instead.
    pub success: bool,
    /// The progress report.
    pub data: SprintProgress,
    /// Human-readable status.
    pub message: String,
}

impl From<SprintProgress> for ProgressResponse {
    fn from(data: SprintProgress) -> Self {
        Self {
            success: true,
            data,
            message: PROGRESS_MESSAGE.to_string(),
        }
    }
}

/// The most recent sprint: latest due date, else latest creation date, else
/// the last sprint value in sheet order.
pub fn most_recent_sprint(issues: &[Issue]) -> Option<String> {
    latest_sprint_by(issues, |i| i.due_date)
        .or_else(|| latest_sprint_by(issues, |i| i.created))
        .or_else(|| issues.iter().rev().find_map(|i| i.sprint.as_deref()))
        .map(str::to_string)
}

/// Sprint of the issue with the latest `key`; the first row wins ties.
fn latest_sprint_by(issues: &[Issue], key: fn(&Issue) -> Option<NaiveDateTime>) -> Option<&str> {
    let mut best: Option<(NaiveDateTime, &str)> = None;
    for issue in issues {
        let (Some(sprint), Some(at)) = (issue.sprint.as_deref(), key(issue)) else {
            continue;
        };
        if best.is_none_or(|(b, _)| at > b) {
            best = Some((at, sprint));
        }
    }
    best.map(|(_, sprint)| sprint)
}

/// Count issues per status, largest count first, ties by status name.
pub fn status_counts(issues: &[&Issue]) -> Vec<StatusCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for issue in issues {
        *counts.entry(label(&issue.status)).or_default() += 1;
    }
    let total = issues.len();
    let mut result: Vec<StatusCount> = counts
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
            percentage: share(count, total),
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
    result
}

/// Bug statistics over `issues`.
pub fn bug_info(issues: &[&Issue], rules: &SprintRules) -> BugInfo {
    let bugs: Vec<&Issue> = issues.iter().copied().filter(|i| rules.is_bug(i)).collect();
    let mut by_severity = BTreeMap::new();
    for bug in &bugs {
        let severity = bug.priority.as_deref().unwrap_or(UNKNOWN);
        *by_severity.entry(severity.to_string()).or_default() += 1;
    }
    BugInfo {
        total_bugs: bugs.len(),
        bugs_by_severity: by_severity,
        bugs_by_status: status_counts(&bugs),
    }
}

/// Progress for `sprint_name`, or for the most recent sprint when `None`.
///
/// A named sprint with no issues yields an all-zero report. With no name
/// and no sprint values in the sheet the result is [`Error::NotFound`].
pub fn sprint_progress(
    issues: &[Issue],
    sprint_name: Option<&str>,
    rules: &SprintRules,
    today: NaiveDate,
    last_updated: DateTime<Utc>,
) -> Result<SprintProgress> {
    let name = match sprint_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => most_recent_sprint(issues)
            .ok_or_else(|| Error::sprint_not_found("(no sprint values in sheet)"))?,
    };

    let selected = select(issues, Some(&name));
    let done: Vec<&Issue> = selected.iter().copied().filter(|i| rules.is_done(i)).collect();

    let total_points: f64 = selected.iter().map(|i| i.story_points).sum();
    let done_points: f64 = done.iter().map(|i| i.story_points).sum();

    let sprint_end_date = selected.iter().filter_map(|i| i.due_date).max();
    let remaining_work_days = sprint_end_date.map(|end| working_days(today, end.date()));

    Ok(SprintProgress {
        total_stories: selected.len(),
        completed_stories: done.len(),
        completion_percentage: share(done.len(), selected.len()),
        total_story_points: total_points,
        completed_story_points: done_points,
        story_points_completion_percentage: completion_rate(done_points, total_points),
        remaining_work_days,
        sprint_end_date,
        status_breakdown: status_counts(&selected),
        bug_info: bug_info(&selected, rules),
        last_updated,
        sprint_name: name,
    })
}

fn label(value: &str) -> &str {
    let value = value.trim();
    if value.is_empty() { UNKNOWN } else { value }
}

fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let (count, total) = (count as f64, total as f64);
    round2(count / total * 100.0)
}

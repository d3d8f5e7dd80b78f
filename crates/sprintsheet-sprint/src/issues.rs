//! Issue rows as sprint metrics see them.

use chrono::{NaiveDate, NaiveDateTime};
use sprintsheet_core::config::SprintConfig;
use sprintsheet_core::util::fields::matches_any;
use sprintsheet_core::{IssueColumns, Sheet};
use sprintsheet_table::is_all;

/// One issue row with the fields sprint metrics use.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Issue key.
    pub key: String,
    /// Issue type; empty when absent.
    pub issue_type: String,
    /// Workflow status; empty when absent.
    pub status: String,
    /// Priority, used as bug severity.
    pub priority: Option<String>,
    /// Sprint label.
    pub sprint: Option<String>,
    /// Story points; 0 when absent or not numeric.
    pub story_points: f64,
    /// Creation time.
    pub created: Option<NaiveDateTime>,
    /// Last update time.
    pub updated: Option<NaiveDateTime>,
    /// Resolution time.
    pub resolved: Option<NaiveDateTime>,
    /// Due date.
    pub due_date: Option<NaiveDateTime>,
}

impl Issue {
    /// Day the issue counts as completed: resolution, else last update,
    /// else `today`.
    pub fn completion_date(&self, today: NaiveDate) -> NaiveDate {
        self.resolved
            .or(self.updated)
            .map_or(today, |dt| dt.date())
    }

    /// Whether the issue belongs to `sprint` (trimmed, exact).
    pub fn in_sprint(&self, sprint: &str) -> bool {
        self.sprint.as_deref() == Some(sprint.trim())
    }
}

/// Extract all issues from a sheet.
pub fn issues(sheet: &Sheet) -> Vec<Issue> {
    let cols = IssueColumns::resolve(sheet);
    sheet
        .records()
        .map(|r| Issue {
            key: r.text(cols.key).unwrap_or_default().to_string(),
            issue_type: r.text(cols.issue_type).unwrap_or_default().to_string(),
            status: r.text(cols.status).unwrap_or_default().to_string(),
            priority: r.text(cols.priority).map(str::to_string),
            sprint: r.text(cols.sprint).map(str::to_string),
            story_points: r.number(cols.story_points).unwrap_or(0.0),
            created: r.date(cols.created),
            updated: r.date(cols.updated),
            resolved: r.date(cols.resolved),
            due_date: r.date(cols.due_date),
        })
        .collect()
}

/// Issues in `sprint`, or all issues when `sprint` is `None`, blank or `All`.
pub fn select<'a>(issues: &'a [Issue], sprint: Option<&str>) -> Vec<&'a Issue> {
    match sprint.filter(|s| !is_all(s)) {
        Some(name) => issues.iter().filter(|i| i.in_sprint(name)).collect(),
        None => issues.iter().collect(),
    }
}

/// Status and type rules for sprint metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct SprintRules {
    /// Statuses counted as completed.
    pub done_statuses: Vec<String>,
    /// Issue type counted as a bug.
    pub bug_issue_type: String,
}

impl Default for SprintRules {
    fn default() -> Self {
        Self::from(&SprintConfig::default())
    }
}

impl From<&SprintConfig> for SprintRules {
    fn from(config: &SprintConfig) -> Self {
        Self {
            done_statuses: config.done_statuses.clone(),
            bug_issue_type: config.bug_issue_type.clone(),
        }
    }
}

impl SprintRules {
    /// Whether `issue` is completed.
    pub fn is_done(&self, issue: &Issue) -> bool {
        matches_any(&issue.status, &self.done_statuses)
    }

    /// Whether `issue` is a bug.
    pub fn is_bug(&self, issue: &Issue) -> bool {
        issue
            .issue_type
            .trim()
            .eq_ignore_ascii_case(self.bug_issue_type.trim())
    }
}

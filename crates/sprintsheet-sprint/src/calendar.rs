//! Sprint calendar: ids, windows, and states.
//!
//! Sprints declared in configuration take precedence. Anything else that
//! appears in the `Sprint` column gets a window derived from its issues:
//! earliest `Created` to latest `Due date`.

use chrono::NaiveDate;
use serde::Serialize;
use sprintsheet_core::{Config, Error, Result, Sheet, SprintCalendarEntry};
use sprintsheet_table::sprint_names;

use crate::burndown::SprintWindow;
use crate::issues::Issue;

/// Sprint metadata for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintInfo {
    /// Sprint label.
    pub sprint_name: String,
    /// Tracker id, or position in the sprint list.
    pub sprint_id: u64,
    /// Board the sprint belongs to.
    pub board_name: String,
    /// `future`, `active` or `closed`.
    pub state: String,
    /// First day.
    pub start_date: Option<NaiveDate>,
    /// Last day.
    pub end_date: Option<NaiveDate>,
    /// Day the sprint was closed.
    pub complete_date: Option<NaiveDate>,
    /// Sprint goal.
    pub goal: String,
}

impl SprintInfo {
    /// The sprint window, or [`Error::Unprocessable`] when either date is
    /// unknown.
    pub fn window(&self) -> Result<SprintWindow> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start <= end => Ok(SprintWindow::new(start, end)),
            (Some(_), Some(_)) => Err(Error::unprocessable(format!(
                "sprint '{}' ends before it starts",
                self.sprint_name
            ))),
            _ => Err(Error::unprocessable(format!(
                "sprint window unknown for '{}': start and end dates are required",
                self.sprint_name
            ))),
        }
    }
}

/// State of a sprint relative to `today`.
pub fn sprint_state(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> &'static str {
    match (start, end) {
        (_, Some(end)) if today > end => "closed",
        (Some(start), _) if today < start => "future",
        (None, None) => "future",
        _ => "active",
    }
}

/// Resolves sprint names to [`SprintInfo`].
#[derive(Debug, Clone)]
pub struct SprintCalendar<'a> {
    entries: &'a [SprintCalendarEntry],
    board_name: String,
    names: Vec<String>,
}

impl<'a> SprintCalendar<'a> {
    /// Build a calendar from configuration and the sprints present in `sheet`.
    pub fn new(config: &'a Config, sheet: &Sheet) -> Self {
        Self::with_names(&config.sprints, config.board_name(), sprint_names(sheet))
    }

    /// Build a calendar from explicit parts.
    pub fn with_names(
        entries: &'a [SprintCalendarEntry],
        board_name: impl Into<String>,
        names: Vec<String>,
    ) -> Self {
        Self {
            entries,
            board_name: board_name.into(),
            names,
        }
    }

    /// Resolve `name`. Unknown sprints are [`Error::NotFound`].
    pub fn info(&self, name: &str, issues: &[Issue], today: NaiveDate) -> Result<SprintInfo> {
        let name = name.trim();
        let entry_pos = self.entries.iter().position(|e| e.name.trim() == name);
        let data_pos = self.names.iter().position(|n| n == name);
        if entry_pos.is_none() && data_pos.is_none() {
            return Err(Error::sprint_not_found(name));
        }

        let sprint_issues = move || issues.iter().filter(move |i| i.in_sprint(name));
        let derived_start = sprint_issues()
            .filter_map(|i| i.created)
            .min()
            .map(|dt| dt.date());
        let derived_end = sprint_issues()
            .filter_map(|i| i.due_date)
            .max()
            .map(|dt| dt.date());

        // Configured-only sprints are numbered after the data sprints.
        let position = data_pos
            .or_else(|| entry_pos.map(|p| self.names.len() + p))
            .unwrap_or_default();
        let fallback_id = u64::try_from(position + 1).unwrap_or(u64::MAX);

        let entry = entry_pos.and_then(|p| self.entries.get(p));
        let start_date = entry.and_then(|e| e.start_date).or(derived_start);
        let end_date = entry.and_then(|e| e.end_date).or(derived_end);

        Ok(SprintInfo {
            sprint_name: name.to_string(),
            sprint_id: entry.and_then(|e| e.id).unwrap_or(fallback_id),
            board_name: entry
                .and_then(|e| e.board_name.clone())
                .unwrap_or_else(|| self.board_name.clone()),
            state: entry
                .and_then(|e| e.state.clone())
                .unwrap_or_else(|| sprint_state(start_date, end_date, today).to_string()),
            start_date,
            end_date,
            complete_date: entry.and_then(|e| e.complete_date),
            goal: entry.map(|e| e.goal.clone()).unwrap_or_default(),
        })
    }
}

//! Sprint burndown.
//!
//! The ideal line falls linearly over the sprint's working days from the
//! total story points to zero. The actual line subtracts each done issue's
//! points on its completion date and stops at `today`.

use chrono::NaiveDate;
use serde::Serialize;
use sprintsheet_core::{Config, Result, Sheet};

use crate::calendar::SprintCalendar;
use crate::health::{SprintStatus, completion_rate, round1, round2};
use crate::issues::{Issue, SprintRules};
use crate::workdays::{is_working_day, working_day_dates, working_days};

/// First and last day of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SprintWindow {
    /// First day.
    pub start: NaiveDate,
    /// Last day; excluded from working-day counts.
    pub end: NaiveDate,
}

impl SprintWindow {
    /// Create a window.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Working days in the sprint.
    pub fn total_working_days(&self) -> u32 {
        working_days(self.start, self.end)
    }

    /// Working days elapsed as of `today`, clamped to the window.
    pub fn days_elapsed(&self, today: NaiveDate) -> u32 {
        working_days(self.start, today.min(self.end))
    }
}

/// Headline numbers for a sprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintBurndownData {
    /// Sprint label.
    pub sprint_name: String,
    /// Sum of story points in the sprint.
    pub total_story_points: f64,
    /// Sum of story points of done issues.
    pub completed_story_points: f64,
    /// Total minus completed.
    pub remaining_story_points: f64,
    /// Completed share in percent.
    pub completion_rate: f64,
    /// Health against the schedule.
    pub status: SprintStatus,
    /// Working days in the window.
    pub total_working_days: u32,
    /// Working days elapsed.
    pub days_elapsed: u32,
    /// Working days left.
    pub remaining_working_days: u32,
}

/// One calendar day of the sprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayProgress {
    /// Working days elapsed before this date.
    pub day: u32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Ideal remaining points.
    pub ideal_remaining: f64,
    /// Actual remaining points; `None` after today.
    pub actual_remaining: Option<f64>,
    /// Whether the date is a working day.
    pub is_working_day: bool,
}

/// One chart point per working-day index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataPoint {
    /// Working-day index.
    pub day: u32,
    /// Date at which `day` working days have elapsed.
    pub date: NaiveDate,
    /// Ideal remaining points.
    pub ideal: f64,
    /// Actual remaining points; `None` after today.
    pub actual: Option<f64>,
}

/// Full burndown response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Burndown {
    /// Headline numbers.
    pub sprint_data: SprintBurndownData,
    /// Per calendar day.
    pub daily_progress: Vec<DayProgress>,
    /// Per working-day index.
    pub chart_data: Vec<ChartDataPoint>,
}

/// Ideal remaining points after `n` of `t` working days.
///
/// With no working days the ideal line is flat at zero.
pub fn ideal_remaining(total: f64, n: u32, t: u32) -> f64 {
    if t == 0 {
        return 0.0;
    }
    let n = n.min(t);
    total * (1.0 - f64::from(n) / f64::from(t))
}

/// Compute the burndown of `issues` over `window` as of `today`.
pub fn burndown(
    sprint_name: &str,
    issues: &[&Issue],
    window: SprintWindow,
    today: NaiveDate,
    rules: &SprintRules,
) -> Burndown {
    let total_working_days = window.total_working_days();
    let days_elapsed = window.days_elapsed(today);

    let total: f64 = issues.iter().map(|i| i.story_points).sum();
    // (completion date, points) for every done issue.
    let completions: Vec<(NaiveDate, f64)> = issues
        .iter()
        .filter(|i| rules.is_done(i))
        .map(|i| (i.completion_date(today), i.story_points))
        .collect();
    let completed: f64 = completions.iter().map(|(_, p)| p).sum();

    let actual_at = |date: NaiveDate| -> Option<f64> {
        if date > today {
            return None;
        }
        let burned: f64 = completions
            .iter()
            .filter(|(done, _)| *done <= date)
            .map(|(_, p)| p)
            .sum();
        Some(total - burned)
    };

    let rate = completion_rate(completed, total);
    let sprint_data = SprintBurndownData {
        sprint_name: sprint_name.to_string(),
        total_story_points: total,
        completed_story_points: completed,
        remaining_story_points: total - completed,
        completion_rate: rate,
        status: SprintStatus::classify(rate, days_elapsed, total_working_days),
        total_working_days,
        days_elapsed,
        remaining_working_days: total_working_days.saturating_sub(days_elapsed),
    };

    let daily_progress = window
        .start
        .iter_days()
        .take_while(|date| *date <= window.end)
        .map(|date| {
            let day = working_days(window.start, date);
            DayProgress {
                day,
                date,
                ideal_remaining: round2(ideal_remaining(total, day, total_working_days)),
                actual_remaining: actual_at(date).map(round2),
                is_working_day: is_working_day(date),
            }
        })
        .collect();

    let chart_data = (0..)
        .zip(working_day_dates(window.start, total_working_days))
        .map(|(n, date)| {
            let date = date.min(window.end);
            ChartDataPoint {
                day: n,
                date,
                ideal: round1(ideal_remaining(total, n, total_working_days)),
                actual: actual_at(date).map(round1),
            }
        })
        .collect();

    tracing::debug!(
        "Burndown for {sprint_name}: {completed}/{total} points, day {days_elapsed}/{total_working_days}"
    );

    Burndown {
        sprint_data,
        daily_progress,
        chart_data,
    }
}

/// Resolve `sprint` through the sprint calendar and compute its burndown.
///
/// Unknown sprints are `NotFound`; sprints without a known window are
/// `Unprocessable`.
pub fn sprint_burndown(
    config: &Config,
    sheet: &Sheet,
    sprint: &str,
    today: NaiveDate,
) -> Result<Burndown> {
    let issues = crate::issues::issues(sheet);
    let info = SprintCalendar::new(config, sheet).info(sprint, &issues, today)?;
    let window = info.window()?;
    let selected: Vec<_> = issues
        .iter()
        .filter(|i| i.in_sprint(&info.sprint_name))
        .collect();
    Ok(burndown(
        &info.sprint_name,
        &selected,
        window,
        today,
        &SprintRules::from(&config.sprint),
    ))
}

//! Sprint health classification.
//!
//! A sprint is compared against a straight-line schedule: after `elapsed` of
//! `total` working days, `elapsed / total` of the work should be done.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Deviation (percentage points) at or above which a sprint is on track.
pub const NORMAL_THRESHOLD: f64 = -10.0;

/// Deviation at or above which a sprint is behind but recoverable.
pub const WARNING_THRESHOLD: f64 = -25.0;

/// Health of a sprint relative to its schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SprintStatus {
    /// On track or ahead.
    Normal,
    /// Behind by more than 10 points.
    Warning,
    /// Behind by more than 25 points.
    Danger,
}

impl SprintStatus {
    /// Classify a sprint from its completion rate and elapsed working days.
    ///
    /// A sprint with no working days is always [`SprintStatus::Normal`].
    pub fn classify(completion_rate: f64, days_elapsed: u32, total_working_days: u32) -> Self {
        if total_working_days == 0 {
            return Self::Normal;
        }
        let deviation = completion_rate - expected_completion(days_elapsed, total_working_days);
        if deviation >= NORMAL_THRESHOLD {
            Self::Normal
        } else if deviation >= WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Danger
        }
    }

    /// Dashboard colour.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Normal => "#10b981",
            Self::Warning => "#f59e0b",
            Self::Danger => "#ef4444",
        }
    }

    /// Short human label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "On track",
            Self::Warning => "Slightly behind",
            Self::Danger => "Significantly behind",
        }
    }

    /// Lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected completion (percent) after `days_elapsed` of `total_working_days`.
pub fn expected_completion(days_elapsed: u32, total_working_days: u32) -> f64 {
    if total_working_days == 0 {
        return 0.0;
    }
    f64::from(days_elapsed) * 100.0 / f64::from(total_working_days)
}

/// `completed / total` as a percentage rounded to two decimals; 0 when
/// `total <= 0`.
pub fn completion_rate(completed: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    round2(completed / total * 100.0)
}

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

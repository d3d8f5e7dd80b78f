//! Working-day arithmetic.
//!
//! A working day is any weekday other than Saturday and Sunday. Holidays are
//! not modelled. Ranges are half-open: `[start, end)`.

use chrono::{Datelike, NaiveDate, Weekday};

/// Returns `true` for Monday through Friday.
pub fn is_working_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Number of working days in `[start, end)`. Zero when `start >= end`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sprintsheet_sprint::workdays::working_days;
///
/// let d = |m, d| NaiveDate::from_ymd_opt(2025, m, d).unwrap();
/// assert_eq!(working_days(d(1, 6), d(1, 17)), 9);
/// assert_eq!(working_days(d(1, 1), d(1, 8)), 5);
/// assert_eq!(working_days(d(1, 6), d(1, 10)), 4);
/// ```
pub fn working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start >= end {
        return 0;
    }
    let days = (end - start).num_days();
    let first = i64::from(start.weekday().num_days_from_monday());
    let tail: i64 = (0..days % 7)
        .filter(|offset| (first + offset) % 7 < 5)
        .map(|_| 1)
        .sum();
    u32::try_from(days / 7 * 5 + tail).unwrap_or(u32::MAX)
}

/// The date on which `n` working days have elapsed since `start`.
///
/// `n == 0` yields `start`. Otherwise the result is the first working day
/// `d` with `working_days(start, d) == n`, so weekends are skipped.
pub fn nth_working_day(start: NaiveDate, n: u32) -> NaiveDate {
    if n == 0 {
        return start;
    }
    let mut date = start;
    let mut elapsed = 0;
    while elapsed < n || !is_working_day(date) {
        if elapsed < n && is_working_day(date) {
            elapsed += 1;
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    date
}

/// `nth_working_day(start, n)` for every `n` in `0..=count`, in one pass.
pub fn working_day_dates(start: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let capacity = usize::try_from(count).map_or(0, |c| c.saturating_add(1));
    let mut dates = Vec::with_capacity(capacity);
    dates.push(start);

    let mut date = start;
    let mut elapsed = 0;
    while elapsed < count {
        if is_working_day(date) {
            elapsed += 1;
        }
        let Some(next) = date.succ_opt() else {
            break;
        };
        date = next;
        if elapsed == 0 {
            continue;
        }
        while !is_working_day(date) {
            let Some(next) = date.succ_opt() else {
                return dates;
            };
            date = next;
        }
        dates.push(date);
    }
    dates
}

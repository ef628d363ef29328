//! School day detection.
//!
//! This module decides whether a calendar date is a school day, and builds
//! the institution-wide set of dates with recorded activity that the
//! heuristic calendar relies on.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{CalendarMode, SchoolCalendar};
use crate::models::{AttendanceEvent, DateRange, LeaveRecord, LeaveType};

/// The kind of a calendar date from the attendance point of view.
///
/// Only [`DayKind::SchoolDay`] dates are classified per person; every other
/// kind resolves to `NotApplicable`.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::DayKind;
///
/// assert!(DayKind::SchoolDay.is_school_day());
/// assert!(!DayKind::Holiday.is_school_day());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// A day after "today".
    Future,
    /// A configured weekend day.
    Weekend,
    /// A listed holiday, or a weekday without institution activity.
    Holiday,
    /// A day on which attendance is expected.
    SchoolDay,
}

impl DayKind {
    /// Returns true for [`DayKind::SchoolDay`].
    pub fn is_school_day(&self) -> bool {
        matches!(self, DayKind::SchoolDay)
    }
}

impl std::fmt::Display for DayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayKind::Future => write!(f, "Future"),
            DayKind::Weekend => write!(f, "Weekend"),
            DayKind::Holiday => write!(f, "Holiday"),
            DayKind::SchoolDay => write!(f, "SchoolDay"),
        }
    }
}

/// Classifies `date` against the calendar.
///
/// # Arguments
///
/// * `date` - The date to classify
/// * `today` - The reference date; anything later is [`DayKind::Future`]
/// * `calendar` - Weekend days, holidays and calendar mode
/// * `active_dates` - Institution-wide activity, see [`institution_active_dates`]
///
/// # Behavior
///
/// - Future dates and weekend days are never school days
/// - Listed holidays are never school days, whatever the mode
/// - In heuristic mode a remaining weekday is a school day only if it is in `active_dates`
/// - In explicit mode every remaining weekday is a school day
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use attendance_engine::calculation::{classify_day, DayKind};
/// use attendance_engine::config::SchoolCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = SchoolCalendar::default();
/// let today = NaiveDate::from_ymd_opt(2026, 3, 13).unwrap();
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// let active: BTreeSet<NaiveDate> = [monday].into_iter().collect();
///
/// assert_eq!(classify_day(monday, today, &calendar, &active), DayKind::SchoolDay);
///
/// // 2026-03-10 had no activity anywhere
/// let tuesday = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
/// assert_eq!(classify_day(tuesday, today, &calendar, &active), DayKind::Holiday);
/// ```
pub fn classify_day(
    date: NaiveDate,
    today: NaiveDate,
    calendar: &SchoolCalendar,
    active_dates: &BTreeSet<NaiveDate>,
) -> DayKind {
    if date > today {
        return DayKind::Future;
    }
    if calendar.is_weekend(date) {
        return DayKind::Weekend;
    }
    if calendar.is_holiday(date) {
        return DayKind::Holiday;
    }
    match calendar.mode {
        CalendarMode::Explicit => DayKind::SchoolDay,
        CalendarMode::Heuristic if active_dates.contains(&date) => DayKind::SchoolDay,
        CalendarMode::Heuristic => DayKind::Holiday,
    }
}

/// Collects every date in `range` on which the institution recorded activity.
///
/// Activity is any attendance event, in either direction, for any person,
/// or any off-site duty leave covering the date.
pub fn institution_active_dates(
    events: &[AttendanceEvent],
    leaves: &[LeaveRecord],
    range: DateRange,
) -> BTreeSet<NaiveDate> {
    let mut dates: BTreeSet<NaiveDate> = events
        .iter()
        .map(|e| e.date)
        .filter(|d| range.contains(*d))
        .collect();

    for leave in leaves
        .iter()
        .filter(|l| l.leave_type == LeaveType::OffSiteDuty)
        .filter(|l| l.overlaps(range.start_date, range.end_date))
    {
        let first = leave.start_date.max(range.start_date);
        let last = leave.last_date().min(range.end_date);
        dates.extend(first.iter_days().take_while(|d| *d <= last));
    }

    dates
}

/// Lists the school days in `range`, in ascending order.
pub fn school_days(
    range: DateRange,
    today: NaiveDate,
    calendar: &SchoolCalendar,
    active_dates: &BTreeSet<NaiveDate>,
) -> Vec<NaiveDate> {
    range
        .days()
        .filter(|d| classify_day(*d, today, calendar, active_dates).is_school_day())
        .collect()
}

//! Daily status resolution.
//!
//! This module classifies one person on one date into exactly one
//! [`DailyStatus`], from the events and leave recorded on that date.
//!
//! # Precedence
//!
//! 1. Non-school days (future, weekend, holiday) are `NotApplicable`
//! 2. An event with an explicit status code is taken at its word
//! 3. An unclassified presence event is classified by its check-in time
//! 4. Otherwise a leave record covering the date decides
//! 5. Otherwise the day is `Unexplained`
//!
//! Attendance events always take precedence over leave for the same cell.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::config::SchoolCalendar;
use crate::models::{
    AttendanceEvent, DailyStatus, Direction, LeaveRecord, LeaveType, Person, RawStatus,
    ReportMode, TimeWindowRule, classify_raw_code,
};

use super::school_day::classify_day;
use super::time_windows::classify_check_in;

/// Everything the resolver needs beyond the records of the day itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionContext<'a> {
    /// The reference date; later dates are not yet classifiable.
    pub today: NaiveDate,
    /// Weekend days, holidays and calendar mode.
    pub calendar: &'a SchoolCalendar,
    /// Dates with institution-wide activity.
    pub active_dates: &'a BTreeSet<NaiveDate>,
    /// Check-in windows for every category and position.
    pub rules: &'a [TimeWindowRule],
}

/// Resolves the status of one cell: a person, a date and a direction.
///
/// `events_on_date` and `leaves_on_date` may contain records for other
/// persons and other dates; only records for this person covering this
/// date are consulted.
///
/// # Behavior
///
/// - Among several matching events, the earliest timed one is read first;
///   untimed events come after timed ones, and events with unrecognised
///   codes are skipped
/// - On check-out, punctuality codes and presence words both read as
///   `Present`: departures are never punctuality-classified
/// - Among several covering leave records, off-site duty wins, then sick,
///   official leave, paid absence and other leave
pub fn resolve_daily_status(
    person: &Person,
    date: NaiveDate,
    direction: Direction,
    events_on_date: &[&AttendanceEvent],
    leaves_on_date: &[&LeaveRecord],
    ctx: &ResolutionContext<'_>,
) -> DailyStatus {
    if !classify_day(date, ctx.today, ctx.calendar, ctx.active_dates).is_school_day() {
        return DailyStatus::NotApplicable;
    }

    if let Some(status) = status_from_events(person, date, direction, events_on_date, ctx.rules) {
        return status;
    }

    leaves_on_date
        .iter()
        .filter(|l| l.person_key == person.identifier && l.covers(date))
        .min_by_key(|l| leave_precedence(l.leave_type))
        .map(|l| l.leave_type.status())
        .unwrap_or(DailyStatus::Unexplained)
}

/// Resolves a cell for a report mode.
///
/// `Complete` reads the check-in status, but an `Unexplained` arrival is
/// upgraded to `Present` when the departure shows presence.
pub fn resolve_for_report(
    person: &Person,
    date: NaiveDate,
    mode: ReportMode,
    events_on_date: &[&AttendanceEvent],
    leaves_on_date: &[&LeaveRecord],
    ctx: &ResolutionContext<'_>,
) -> DailyStatus {
    let resolve = |direction| {
        resolve_daily_status(person, date, direction, events_on_date, leaves_on_date, ctx)
    };

    match mode {
        ReportMode::CheckIn => resolve(Direction::CheckIn),
        ReportMode::CheckOut => resolve(Direction::CheckOut),
        ReportMode::Complete => match resolve(Direction::CheckIn) {
            DailyStatus::Unexplained => {
                if resolve(Direction::CheckOut).is_presence() {
                    DailyStatus::Present
                } else {
                    DailyStatus::Unexplained
                }
            }
            status => status,
        },
    }
}

fn status_from_events(
    person: &Person,
    date: NaiveDate,
    direction: Direction,
    events: &[&AttendanceEvent],
    rules: &[TimeWindowRule],
) -> Option<DailyStatus> {
    let mut candidates: Vec<&AttendanceEvent> = events
        .iter()
        .copied()
        .filter(|e| e.identifier == person.identifier && e.date == date && e.direction == direction)
        .collect();
    // Stable: equal times keep their recorded order.
    candidates.sort_by_key(|e| {
        let time = e.parsed_time();
        (time.is_none(), time)
    });

    candidates.into_iter().find_map(|event| {
        match (classify_raw_code(event.raw_status_code.as_deref()), direction) {
            (RawStatus::Explicit(status), Direction::CheckOut) if status.is_punctuality() => {
                Some(DailyStatus::Present)
            }
            (RawStatus::Explicit(status), _) => Some(status),
            (RawStatus::Unclassified, Direction::CheckIn) => {
                Some(classify_check_in(person, event.parsed_time(), rules))
            }
            (RawStatus::Unclassified, Direction::CheckOut) => Some(DailyStatus::Present),
            (RawStatus::Unrecognised, _) => None,
        }
    })
}

fn leave_precedence(leave_type: LeaveType) -> u8 {
    match leave_type {
        LeaveType::OffSiteDuty => 0,
        LeaveType::Sick => 1,
        LeaveType::OfficialLeave => 2,
        LeaveType::PaidAbsence => 3,
        LeaveType::Other => 4,
    }
}

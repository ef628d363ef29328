//! Period aggregation.
//!
//! This module walks a date range, resolves every (person, date) cell and
//! accumulates the per-person counters, presence days, attendance
//! percentage and average check-in time.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::SchoolCalendar;
use crate::error::EngineResult;
use crate::models::{
    AttendanceEvent, DateRange, Direction, LeaveRecord, Person, PersonPeriodSummary, ReportMode,
    StatusCounts, TimeWindowRule,
};

use super::school_day::{institution_active_dates, school_days};
use super::status_resolver::{ResolutionContext, resolve_for_report};

/// The records a period aggregation reads.
///
/// `events` and `leaves` should cover the whole institution, not only the
/// persons being summarised: school-day detection looks at everyone.
#[derive(Debug, Clone, Copy)]
pub struct PeriodInput<'a> {
    /// Attendance events for every person.
    pub events: &'a [AttendanceEvent],
    /// Leave records for every person.
    pub leaves: &'a [LeaveRecord],
    /// Check-in windows.
    pub rules: &'a [TimeWindowRule],
    /// Weekend days, holidays and calendar mode.
    pub calendar: &'a SchoolCalendar,
    /// The reference date; later dates are not counted.
    pub today: NaiveDate,
}

/// The result of aggregating a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodAggregate {
    /// One summary per input person, in input order.
    pub summaries: Vec<PersonPeriodSummary>,
    /// Institution-wide school days in the range.
    pub active_school_days: u32,
}

/// Summarises each person's attendance over `range`.
///
/// # Arguments
///
/// * `persons` - The roster to summarise
/// * `range` - Inclusive date range
/// * `mode` - Which events the report reads
/// * `input` - Records, rules and calendar
///
/// # Returns
///
/// Returns the summaries and the active school day count, or
/// `InvalidDateRange` if `range` is reversed.
///
/// # Behavior
///
/// - `NotApplicable` days contribute to no counter
/// - A date counts once toward `total_present_days`, whatever the mode
/// - `attendance_percentage` is `min(100, present / school days * 100)`,
///   zero when there are no school days, rounded to two places
/// - `average_check_in_minutes` covers every timed check-in in range
pub fn aggregate_period(
    persons: &[Person],
    range: DateRange,
    mode: ReportMode,
    input: &PeriodInput<'_>,
) -> EngineResult<PeriodAggregate> {
    range.validate()?;

    let active_dates = institution_active_dates(input.events, input.leaves, range);
    let days = school_days(range, input.today, input.calendar, &active_dates);
    let active_school_days = days.len() as u32;

    let ctx = ResolutionContext {
        today: input.today,
        calendar: input.calendar,
        active_dates: &active_dates,
        rules: input.rules,
    };

    let events_by_cell = index_events(input.events, range);
    let leaves_by_person = index_leaves(input.leaves, range);

    let summaries = persons
        .iter()
        .map(|person| {
            let leaves = leaves_by_person
                .get(person.identifier.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let mut counts = StatusCounts::default();
            let mut present_dates = BTreeSet::new();
            for date in &days {
                let events = events_by_cell
                    .get(&(person.identifier.as_str(), *date))
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let status = resolve_for_report(person, *date, mode, events, leaves, &ctx);
                counts.record(status);
                if status.is_presence() {
                    present_dates.insert(*date);
                }
            }

            let total_present_days = present_dates.len() as u32;
            PersonPeriodSummary {
                person: person.clone(),
                counts,
                total_present_days,
                attendance_percentage: attendance_percentage(total_present_days, active_school_days),
                average_check_in_minutes: average_check_in_minutes(person, input.events, range),
            }
        })
        .collect();

    Ok(PeriodAggregate {
        summaries,
        active_school_days,
    })
}

/// `min(100, present_days / active_school_days * 100)`, rounded to two places.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::attendance_percentage;
/// use rust_decimal::Decimal;
///
/// assert_eq!(attendance_percentage(2, 3), Decimal::new(6667, 2));
/// assert_eq!(attendance_percentage(0, 0), Decimal::ZERO);
/// ```
pub fn attendance_percentage(present_days: u32, active_school_days: u32) -> Decimal {
    if active_school_days == 0 {
        return Decimal::ZERO;
    }
    let pct = Decimal::from(present_days) * Decimal::ONE_HUNDRED / Decimal::from(active_school_days);
    round_two_places(pct.min(Decimal::ONE_HUNDRED))
}

/// Mean minutes-since-midnight of the person's timed check-ins in `range`.
///
/// Events without a parsable time are ignored; `None` when none remain.
pub fn average_check_in_minutes(
    person: &Person,
    events: &[AttendanceEvent],
    range: DateRange,
) -> Option<Decimal> {
    let minutes: Vec<u32> = events
        .iter()
        .filter(|e| {
            e.identifier == person.identifier
                && e.direction == Direction::CheckIn
                && range.contains(e.date)
        })
        .filter_map(AttendanceEvent::minutes_since_midnight)
        .collect();

    if minutes.is_empty() {
        return None;
    }
    let total: Decimal = minutes.iter().map(|m| Decimal::from(*m)).sum();
    Some(round_two_places(total / Decimal::from(minutes.len())))
}

fn round_two_places(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn index_events(
    events: &[AttendanceEvent],
    range: DateRange,
) -> HashMap<(&str, NaiveDate), Vec<&AttendanceEvent>> {
    let mut index: HashMap<(&str, NaiveDate), Vec<&AttendanceEvent>> = HashMap::new();
    for event in events.iter().filter(|e| range.contains(e.date)) {
        index
            .entry((event.identifier.as_str(), event.date))
            .or_default()
            .push(event);
    }
    index
}

fn index_leaves(leaves: &[LeaveRecord], range: DateRange) -> HashMap<&str, Vec<&LeaveRecord>> {
    let mut index: HashMap<&str, Vec<&LeaveRecord>> = HashMap::new();
    for leave in leaves
        .iter()
        .filter(|l| l.overlaps(range.start_date, range.end_date))
    {
        index.entry(leave.person_key.as_str()).or_default().push(leave);
    }
    index
}

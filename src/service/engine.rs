//! The attendance engine host.
//!
//! [`AttendanceEngine`] binds the pure calculation functions to a record
//! source and a school calendar, and exposes the three operations report
//! views use: single-cell status, period ranking and manual edits.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{
    DayKind, PeriodInput, ResolutionContext, aggregate_period, classify_day,
    institution_active_dates, rank_summaries, resolve_daily_status, resolve_for_report,
    synthesized_check_in_time,
};
use crate::config::SchoolCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceEvent, DailyStatus, DateRange, Direction, LeaveRecord, LeaveType, Person,
    RankingReport, ReportMode, ScoringMode,
};
use crate::source::{AttendanceCommands, AttendanceSource};

use super::observer::{ObserverRegistry, StatusChange, StatusObserver, SubscriptionId};

/// Engine version stamped on every report.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computes statuses and rankings over a record source.
///
/// The engine keeps no derived state between calls: every operation reads
/// the source afresh. "Today" defaults to the local date and can be pinned
/// with [`AttendanceEngine::with_today`].
///
/// # Example
///
/// ```
/// use attendance_engine::config::SchoolCalendar;
/// use attendance_engine::models::{DailyStatus, Direction, Person, PersonCategory};
/// use attendance_engine::service::AttendanceEngine;
/// use attendance_engine::source::MemoryStore;
/// use chrono::NaiveDate;
///
/// let engine = AttendanceEngine::new(MemoryStore::new(Vec::new()), SchoolCalendar::default())
///     .with_today(NaiveDate::from_ymd_opt(2026, 3, 13).unwrap());
/// let person = Person {
///     identifier: "0045123".to_string(),
///     name: "Siti Aminah".to_string(),
///     category: PersonCategory::Student,
///     position: None,
///     active: true,
/// };
///
/// // No activity anywhere on that Monday: not a school day.
/// let monday = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
/// let status = engine.daily_status(&person, monday, Direction::CheckIn).unwrap();
/// assert_eq!(status, DailyStatus::NotApplicable);
/// ```
#[derive(Debug)]
pub struct AttendanceEngine<S> {
    source: S,
    calendar: SchoolCalendar,
    today: Option<NaiveDate>,
    observers: ObserverRegistry,
}

impl<S: AttendanceSource> AttendanceEngine<S> {
    /// Creates an engine over `source`.
    pub fn new(source: S, calendar: SchoolCalendar) -> Self {
        Self {
            source,
            calendar,
            today: None,
            observers: ObserverRegistry::default(),
        }
    }

    /// Pins the reference date instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The reference date: later dates are never school days.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// The school calendar in use.
    pub fn calendar(&self) -> &SchoolCalendar {
        &self.calendar
    }

    /// The underlying record source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the record source, for bulk imports.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Registers an observer for manual edits.
    pub fn subscribe<O: StatusObserver + 'static>(&mut self, observer: O) -> SubscriptionId {
        self.observers.subscribe(Arc::new(observer))
    }

    /// Removes an observer. Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Resolves one cell: a person, a date and a direction.
    pub fn daily_status(
        &self,
        person: &Person,
        date: NaiveDate,
        direction: Direction,
    ) -> EngineResult<DailyStatus> {
        let day = DateRange::single(date);
        let events = self.source.attendance_events(day)?;
        let leaves = self.source.leave_records(day)?;
        let rules = self.source.time_window_rules()?;
        let active_dates = institution_active_dates(&events, &leaves, day);

        let ctx = ResolutionContext {
            today: self.today(),
            calendar: &self.calendar,
            active_dates: &active_dates,
            rules: &rules,
        };
        let event_refs: Vec<&AttendanceEvent> = events.iter().collect();
        let leave_refs: Vec<&LeaveRecord> = leaves.iter().collect();

        Ok(resolve_daily_status(
            person,
            date,
            direction,
            &event_refs,
            &leave_refs,
            &ctx,
        ))
    }

    /// Resolves one cell as a report in `mode` would show it.
    pub fn report_status(
        &self,
        person: &Person,
        date: NaiveDate,
        mode: ReportMode,
    ) -> EngineResult<DailyStatus> {
        let day = DateRange::single(date);
        let events = self.source.attendance_events(day)?;
        let leaves = self.source.leave_records(day)?;
        let rules = self.source.time_window_rules()?;
        let active_dates = institution_active_dates(&events, &leaves, day);

        let ctx = ResolutionContext {
            today: self.today(),
            calendar: &self.calendar,
            active_dates: &active_dates,
            rules: &rules,
        };
        let event_refs: Vec<&AttendanceEvent> = events.iter().collect();
        let leave_refs: Vec<&LeaveRecord> = leaves.iter().collect();

        Ok(resolve_for_report(
            person,
            date,
            mode,
            &event_refs,
            &leave_refs,
            &ctx,
        ))
    }

    /// Aggregates, scores and ranks `persons` over `range`.
    ///
    /// # Returns
    ///
    /// Returns the ranked report, or an error if:
    /// - `range` is reversed (`InvalidDateRange`)
    /// - the source cannot be read
    pub fn compute_ranking(
        &self,
        persons: &[Person],
        range: DateRange,
        scoring_mode: ScoringMode,
        report_mode: ReportMode,
    ) -> EngineResult<RankingReport> {
        range.validate()?;
        let start_time = Instant::now();

        let events = self.source.attendance_events(range)?;
        let leaves = self.source.leave_records(range)?;
        let rules = self.source.time_window_rules()?;
        let input = PeriodInput {
            events: &events,
            leaves: &leaves,
            rules: &rules,
            calendar: &self.calendar,
            today: self.today(),
        };

        let aggregate = aggregate_period(persons, range, report_mode, &input)?;
        let entries = rank_summaries(aggregate.summaries, scoring_mode);

        info!(
            persons = persons.len(),
            start_date = %range.start_date,
            end_date = %range.end_date,
            scoring_mode = ?scoring_mode,
            report_mode = ?report_mode,
            active_school_days = aggregate.active_school_days,
            duration_us = start_time.elapsed().as_micros(),
            "Ranking computed"
        );

        Ok(RankingReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            range,
            scoring_mode,
            report_mode,
            active_school_days: aggregate.active_school_days,
            entries,
        })
    }
}

impl<S: AttendanceCommands> AttendanceEngine<S> {
    /// Sets a cell to a status code, rewriting the underlying records.
    ///
    /// # Arguments
    ///
    /// * `person` - The person edited
    /// * `date` - The edited date
    /// * `direction` - Which event the edit replaces
    /// * `code` - A status code or long form; see [`DailyStatus::from_code`]
    ///
    /// # Behavior
    ///
    /// - `""`, `-` and `A` clear the cell: the person's events for that
    ///   direction and any leave on that date are removed
    /// - Leave codes (`DL`, `I`, `S`, `C`) replace the events for that
    ///   direction and any leave on that date with a single-day leave
    /// - Attendance codes (`TW`, `T1`, `T2`, `H`) replace any leave on that
    ///   date and the events for that direction with one coded event, timed
    ///   inside the matching check-in window
    /// - Observers are notified after the source has been updated
    ///
    /// # Errors
    ///
    /// - `UnknownStatusCode` if `code` is not recognised
    /// - `InvalidManualStatus` for punctuality codes on check-out, and for
    ///   future dates, weekend days and listed holidays
    /// - `InvalidManualStatus` when the date would not be a school day after
    ///   the edit: under the heuristic calendar, leave other than `DL` or a
    ///   clear on a date with no other recorded activity
    ///
    /// Nothing is written when the edit is rejected.
    pub fn set_manual_status(
        &mut self,
        person: &Person,
        date: NaiveDate,
        direction: Direction,
        code: &str,
    ) -> EngineResult<StatusChange> {
        let target = parse_manual_code(code)?;
        self.check_editable(person, date, direction, code, target)?;

        let previous = self.daily_status(person, date, direction)?;
        let identifier = person.identifier.as_str();

        let (removed_events, removed_leaves) = match target {
            None => (
                self.source.remove_attendance_events(identifier, date, direction)?,
                self.source.remove_leave_on(identifier, date)?,
            ),
            Some(status) => {
                let removed_events =
                    self.source.remove_attendance_events(identifier, date, direction)?;
                let removed_leaves = self.source.remove_leave_on(identifier, date)?;
                match LeaveType::from_status(status) {
                    Some(leave_type) => self.source.insert_leave_record(LeaveRecord::single_day(
                        identifier, date, leave_type,
                    ))?,
                    None => {
                        let rules = self.source.time_window_rules()?;
                        let time_of_day = match direction {
                            Direction::CheckIn => synthesized_check_in_time(person, status, &rules),
                            Direction::CheckOut => None,
                        };
                        self.source.insert_attendance_event(AttendanceEvent {
                            identifier: identifier.to_string(),
                            date,
                            time_of_day: time_of_day.map(|t| t.format("%H:%M").to_string()),
                            direction,
                            raw_status_code: Some(status.code().to_string()),
                        })?;
                    }
                }
                (removed_events, removed_leaves)
            }
        };

        let current = self.daily_status(person, date, direction)?;
        let expected = target.unwrap_or(DailyStatus::Unexplained);
        if current != expected {
            return Err(EngineError::InvalidManualStatus {
                code: code.to_string(),
                direction: direction.to_string(),
                message: format!("cell resolved to {current} after the edit"),
            });
        }
        info!(
            identifier = %identifier,
            date = %date,
            direction = %direction,
            code = %code,
            previous = %previous,
            current = %current,
            removed_events,
            removed_leaves,
            "Manual status applied"
        );

        let change = StatusChange {
            identifier: identifier.to_string(),
            date,
            direction,
            previous,
            current,
        };
        debug!(observers = self.observers.len(), "Notifying status observers");
        self.observers.notify(&change);
        Ok(change)
    }

    fn check_editable(
        &self,
        person: &Person,
        date: NaiveDate,
        direction: Direction,
        code: &str,
        target: Option<DailyStatus>,
    ) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidManualStatus {
            code: code.to_string(),
            direction: direction.to_string(),
            message,
        };

        if direction == Direction::CheckOut && target.is_some_and(|s| s.is_punctuality()) {
            return Err(invalid(
                "punctuality tiers apply to check-in only".to_string(),
            ));
        }

        // Activity that survives the edit: the records it replaces are left out.
        let day = DateRange::single(date);
        let remaining_events: Vec<AttendanceEvent> = self
            .source
            .attendance_events(day)?
            .into_iter()
            .filter(|e| !(e.identifier == person.identifier && e.direction == direction))
            .collect();
        let remaining_leaves: Vec<LeaveRecord> = self
            .source
            .leave_records(day)?
            .into_iter()
            .filter(|l| l.person_key != person.identifier)
            .collect();
        let mut active_dates = institution_active_dates(&remaining_events, &remaining_leaves, day);
        if target.is_some_and(activates_day) {
            active_dates.insert(date);
        }

        match classify_day(date, self.today(), &self.calendar, &active_dates) {
            DayKind::SchoolDay => Ok(()),
            DayKind::Future => Err(invalid(format!("{date} is in the future"))),
            DayKind::Weekend | DayKind::Holiday => {
                Err(invalid(format!("{date} is not a school day")))
            }
        }
    }
}

/// Attendance codes and off-site duty record institution activity on the date.
fn activates_day(status: DailyStatus) -> bool {
    matches!(
        LeaveType::from_status(status),
        None | Some(LeaveType::OffSiteDuty)
    )
}

/// Parses a manual edit code. `None` means "clear the cell".
fn parse_manual_code(code: &str) -> EngineResult<Option<DailyStatus>> {
    if code.trim().is_empty() {
        return Ok(None);
    }
    match DailyStatus::from_code(code) {
        Some(DailyStatus::NotApplicable | DailyStatus::Unexplained) => Ok(None),
        Some(status) => Ok(Some(status)),
        None => Err(EngineError::UnknownStatusCode {
            code: code.to_string(),
        }),
    }
}

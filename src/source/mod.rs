//! Record sources consumed by the engine.
//!
//! The engine never owns persistence. It reads rosters, events, leave and
//! time windows through [`AttendanceSource`], and manual edits write back
//! through [`AttendanceCommands`]. [`MemoryStore`] implements both and backs
//! the HTTP server and the tests.

mod memory;

pub use memory::{ImportSummary, MemoryStore};

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    AttendanceEvent, DateRange, Direction, LeaveRecord, Person, PersonCategory, TimeWindowRule,
};

/// Read access to the records the engine classifies.
pub trait AttendanceSource: Send + Sync {
    /// Active persons of `category`, optionally restricted to one position.
    ///
    /// Position filters compare after normalization, see
    /// [`crate::models::normalize_position`].
    fn active_persons(
        &self,
        category: PersonCategory,
        position: Option<&str>,
    ) -> EngineResult<Vec<Person>>;

    /// Looks up a single person by identifier, active or not.
    fn find_person(&self, identifier: &str) -> EngineResult<Option<Person>>;

    /// Every attendance event dated within `range`, for every person.
    fn attendance_events(&self, range: DateRange) -> EngineResult<Vec<AttendanceEvent>>;

    /// Every leave record overlapping `range`, for every person.
    fn leave_records(&self, range: DateRange) -> EngineResult<Vec<LeaveRecord>>;

    /// The configured check-in windows.
    fn time_window_rules(&self) -> EngineResult<Vec<TimeWindowRule>>;
}

/// Write access used by manual status edits.
pub trait AttendanceCommands: AttendanceSource {
    /// Deletes the person's events for one date and direction. Returns the
    /// number of events removed.
    fn remove_attendance_events(
        &mut self,
        identifier: &str,
        date: NaiveDate,
        direction: Direction,
    ) -> EngineResult<usize>;

    /// Stores a new attendance event.
    fn insert_attendance_event(&mut self, event: AttendanceEvent) -> EngineResult<()>;

    /// Removes `date` from every leave record of the person, splitting spans
    /// that cover it. Returns the number of records affected.
    fn remove_leave_on(&mut self, person_key: &str, date: NaiveDate) -> EngineResult<usize>;

    /// Stores a new leave record.
    fn insert_leave_record(&mut self, leave: LeaveRecord) -> EngineResult<()>;
}

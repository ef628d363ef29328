//! In-memory record store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::migrate_legacy_leave_keys;
use crate::error::EngineResult;
use crate::models::{
    AttendanceEvent, DateRange, Direction, LeaveRecord, Person, PersonCategory, TimeWindowRule,
};

use super::{AttendanceCommands, AttendanceSource};

/// What an [`MemoryStore::import`] call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Persons inserted or replaced.
    pub persons: usize,
    /// Attendance events appended.
    pub events: usize,
    /// Leave records appended.
    pub leaves: usize,
    /// Leave records whose name key was rewritten to an identifier.
    pub rewritten_leave_keys: usize,
    /// Leave keys that matched no person.
    pub unmatched_leave_keys: Vec<String>,
    /// Leave keys that matched several persons.
    pub ambiguous_leave_keys: Vec<String>,
}

/// A store holding every record in memory.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Person, PersonCategory};
/// use attendance_engine::source::{AttendanceSource, MemoryStore};
///
/// let mut store = MemoryStore::new(Vec::new());
/// store.import(
///     vec![Person {
///         identifier: "0045123".to_string(),
///         name: "Siti Aminah".to_string(),
///         category: PersonCategory::Student,
///         position: Some("X IPA 1".to_string()),
///         active: true,
///     }],
///     Vec::new(),
///     Vec::new(),
/// );
///
/// let roster = store.active_persons(PersonCategory::Student, Some("x ipa 1")).unwrap();
/// assert_eq!(roster.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    persons: Vec<Person>,
    events: Vec<AttendanceEvent>,
    leaves: Vec<LeaveRecord>,
    rules: Vec<TimeWindowRule>,
}

impl MemoryStore {
    /// Creates an empty store with the given check-in windows.
    pub fn new(rules: Vec<TimeWindowRule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Adds records to the store.
    ///
    /// Persons replace any existing person with the same identifier. Leave
    /// records keyed by a display name are rewritten to the identifier of
    /// the single matching person, across the whole roster after import.
    pub fn import(
        &mut self,
        persons: Vec<Person>,
        events: Vec<AttendanceEvent>,
        leaves: Vec<LeaveRecord>,
    ) -> ImportSummary {
        let person_count = persons.len();
        for person in persons {
            match self
                .persons
                .iter_mut()
                .find(|p| p.identifier == person.identifier)
            {
                Some(existing) => *existing = person,
                None => self.persons.push(person),
            }
        }

        let event_count = events.len();
        self.events.extend(events);

        let leave_count = leaves.len();
        let migration = migrate_legacy_leave_keys(leaves, &self.persons);
        self.leaves.extend(migration.records);

        ImportSummary {
            persons: person_count,
            events: event_count,
            leaves: leave_count,
            rewritten_leave_keys: migration.rewritten,
            unmatched_leave_keys: migration.unmatched,
            ambiguous_leave_keys: migration.ambiguous,
        }
    }

    /// Every stored attendance event.
    pub fn events(&self) -> &[AttendanceEvent] {
        &self.events
    }

    /// Every stored leave record.
    pub fn leaves(&self) -> &[LeaveRecord] {
        &self.leaves
    }
}

impl AttendanceSource for MemoryStore {
    fn active_persons(
        &self,
        category: PersonCategory,
        position: Option<&str>,
    ) -> EngineResult<Vec<Person>> {
        Ok(self
            .persons
            .iter()
            .filter(|p| p.active && p.category == category)
            .filter(|p| position.is_none_or(|key| p.matches_position(key)))
            .cloned()
            .collect())
    }

    fn find_person(&self, identifier: &str) -> EngineResult<Option<Person>> {
        Ok(self
            .persons
            .iter()
            .find(|p| p.identifier == identifier)
            .cloned())
    }

    fn attendance_events(&self, range: DateRange) -> EngineResult<Vec<AttendanceEvent>> {
        range.validate()?;
        Ok(self
            .events
            .iter()
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect())
    }

    fn leave_records(&self, range: DateRange) -> EngineResult<Vec<LeaveRecord>> {
        range.validate()?;
        Ok(self
            .leaves
            .iter()
            .filter(|l| l.overlaps(range.start_date, range.end_date))
            .cloned()
            .collect())
    }

    fn time_window_rules(&self) -> EngineResult<Vec<TimeWindowRule>> {
        Ok(self.rules.clone())
    }
}

impl AttendanceCommands for MemoryStore {
    fn remove_attendance_events(
        &mut self,
        identifier: &str,
        date: NaiveDate,
        direction: Direction,
    ) -> EngineResult<usize> {
        let before = self.events.len();
        self.events
            .retain(|e| !(e.identifier == identifier && e.date == date && e.direction == direction));
        Ok(before - self.events.len())
    }

    fn insert_attendance_event(&mut self, event: AttendanceEvent) -> EngineResult<()> {
        self.events.push(event);
        Ok(())
    }

    fn remove_leave_on(&mut self, person_key: &str, date: NaiveDate) -> EngineResult<usize> {
        let mut affected = 0;
        let mut kept = Vec::with_capacity(self.leaves.len());
        for leave in self.leaves.drain(..) {
            if leave.person_key == person_key && leave.covers(date) {
                affected += 1;
                kept.extend(leave.carve_out(date));
            } else {
                kept.push(leave);
            }
        }
        self.leaves = kept;
        Ok(affected)
    }

    fn insert_leave_record(&mut self, leave: LeaveRecord) -> EngineResult<()> {
        self.leaves.push(leave);
        Ok(())
    }
}

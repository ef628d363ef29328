//! Leave record model.
//!
//! A [`LeaveRecord`] covers a single date or an inclusive date span.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DailyStatus;

/// The kind of leave recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Field duty away from school (dinas luar).
    #[serde(alias = "DL")]
    OffSiteDuty,
    /// Sick leave (sakit).
    #[serde(alias = "S")]
    Sick,
    /// Official permission (izin).
    #[serde(alias = "I")]
    OfficialLeave,
    /// Paid absence (cuti).
    #[serde(alias = "C")]
    PaidAbsence,
    /// Any other excused absence.
    Other,
}

impl LeaveType {
    /// The daily status this leave produces.
    ///
    /// `Other` has no status of its own and reads as an official leave.
    pub fn status(&self) -> DailyStatus {
        match self {
            LeaveType::OffSiteDuty => DailyStatus::OffSiteDuty,
            LeaveType::Sick => DailyStatus::Sick,
            LeaveType::OfficialLeave | LeaveType::Other => DailyStatus::OfficialLeave,
            LeaveType::PaidAbsence => DailyStatus::PaidAbsence,
        }
    }

    /// The leave type a status is stored as, if it is stored as leave at all.
    pub fn from_status(status: DailyStatus) -> Option<LeaveType> {
        match status {
            DailyStatus::OffSiteDuty => Some(LeaveType::OffSiteDuty),
            DailyStatus::Sick => Some(LeaveType::Sick),
            DailyStatus::OfficialLeave => Some(LeaveType::OfficialLeave),
            DailyStatus::PaidAbsence => Some(LeaveType::PaidAbsence),
            _ => None,
        }
    }
}

/// A leave entry for one person.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{LeaveRecord, LeaveType};
/// use chrono::NaiveDate;
///
/// let leave = LeaveRecord {
///     person_key: "0045123".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     end_date: Some(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()),
///     leave_type: LeaveType::Sick,
/// };
/// assert!(leave.covers(NaiveDate::from_ymd_opt(2026, 3, 3).unwrap()));
/// assert!(!leave.covers(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// The person's identifier. Legacy rows may still hold a display name;
    /// see `calculation::migrate_legacy_leave_keys`.
    pub person_key: String,
    /// First day of leave (inclusive).
    #[serde(alias = "date")]
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive). `None` means a single day.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// The kind of leave.
    pub leave_type: LeaveType,
}

impl LeaveRecord {
    /// Creates a single-day leave record.
    pub fn single_day(person_key: impl Into<String>, date: NaiveDate, leave_type: LeaveType) -> Self {
        Self {
            person_key: person_key.into(),
            start_date: date,
            end_date: None,
            leave_type,
        }
    }

    /// The last covered day. A reversed span collapses to its start date.
    pub fn last_date(&self) -> NaiveDate {
        self.end_date
            .filter(|end| *end >= self.start_date)
            .unwrap_or(self.start_date)
    }

    /// Returns true if the leave covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.last_date()
    }

    /// Returns true if the leave overlaps the inclusive span `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.last_date() >= start
    }

    /// Removes `date` from this leave, returning whatever remains.
    ///
    /// A span is split around the removed day; a single day vanishes.
    pub fn carve_out(&self, date: NaiveDate) -> Vec<LeaveRecord> {
        if !self.covers(date) {
            return vec![self.clone()];
        }

        let mut remaining = Vec::with_capacity(2);
        if let Some(before) = date.pred_opt().filter(|d| *d >= self.start_date) {
            remaining.push(self.with_span(self.start_date, before));
        }
        if let Some(after) = date.succ_opt().filter(|d| *d <= self.last_date()) {
            remaining.push(self.with_span(after, self.last_date()));
        }
        remaining
    }

    fn with_span(&self, start: NaiveDate, end: NaiveDate) -> LeaveRecord {
        LeaveRecord {
            person_key: self.person_key.clone(),
            start_date: start,
            end_date: (end != start).then_some(end),
            leave_type: self.leave_type,
        }
    }
}

//! Daily status classification and status codes.
//!
//! [`DailyStatus`] is derived, never stored. The short codes below are the
//! institution's data-entry vocabulary and are what manual edits send.

use serde::{Deserialize, Serialize};

/// The classification of one person on one date.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DailyStatus;
///
/// assert_eq!(DailyStatus::from_code("tw"), Some(DailyStatus::OnTime));
/// assert_eq!(DailyStatus::from_code("sakit"), Some(DailyStatus::Sick));
/// assert_eq!(DailyStatus::Sick.code(), "S");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyStatus {
    /// Checked in inside the on-time window.
    OnTime,
    /// Checked in inside the first lateness window.
    Stage1Late,
    /// Checked in inside the second lateness window.
    Stage2Late,
    /// Attended but untimed or outside every window.
    Present,
    /// Field duty; counts as attendance.
    OffSiteDuty,
    /// Excused absence (izin).
    OfficialLeave,
    /// Excused absence (sakit).
    Sick,
    /// Paid absence (cuti).
    PaidAbsence,
    /// Absent on a school day with no matching record.
    Unexplained,
    /// Weekend, future date or non-school day.
    NotApplicable,
}

impl DailyStatus {
    /// Every status that a counter exists for, in report column order.
    pub const COUNTED: [DailyStatus; 9] = [
        DailyStatus::OnTime,
        DailyStatus::Stage1Late,
        DailyStatus::Stage2Late,
        DailyStatus::Present,
        DailyStatus::OffSiteDuty,
        DailyStatus::OfficialLeave,
        DailyStatus::Sick,
        DailyStatus::PaidAbsence,
        DailyStatus::Unexplained,
    ];

    /// The short data-entry code for this status.
    pub fn code(&self) -> &'static str {
        match self {
            DailyStatus::OnTime => "TW",
            DailyStatus::Stage1Late => "T1",
            DailyStatus::Stage2Late => "T2",
            DailyStatus::Present => "H",
            DailyStatus::OffSiteDuty => "DL",
            DailyStatus::OfficialLeave => "I",
            DailyStatus::Sick => "S",
            DailyStatus::PaidAbsence => "C",
            DailyStatus::Unexplained => "A",
            DailyStatus::NotApplicable => "-",
        }
    }

    /// Parses a short code or its long form, case-insensitively.
    pub fn from_code(raw: &str) -> Option<DailyStatus> {
        let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        let status = match normalized.to_lowercase().as_str() {
            "tw" | "tepat waktu" | "on time" => DailyStatus::OnTime,
            "t1" | "terlambat 1" => DailyStatus::Stage1Late,
            "t2" | "terlambat 2" => DailyStatus::Stage2Late,
            "h" => DailyStatus::Present,
            "dl" | "dinas luar" => DailyStatus::OffSiteDuty,
            "i" | "izin" => DailyStatus::OfficialLeave,
            "s" | "sakit" => DailyStatus::Sick,
            "c" | "cuti" => DailyStatus::PaidAbsence,
            "a" | "alpa" | "alpha" => DailyStatus::Unexplained,
            "-" => DailyStatus::NotApplicable,
            _ => return None,
        };
        Some(status)
    }

    /// True for statuses that count toward `total_present_days`.
    pub fn is_presence(&self) -> bool {
        matches!(
            self,
            DailyStatus::OnTime
                | DailyStatus::Stage1Late
                | DailyStatus::Stage2Late
                | DailyStatus::Present
                | DailyStatus::OffSiteDuty
        )
    }

    /// True for statuses that count toward total absences.
    pub fn is_absence(&self) -> bool {
        matches!(
            self,
            DailyStatus::OfficialLeave
                | DailyStatus::Sick
                | DailyStatus::PaidAbsence
                | DailyStatus::Unexplained
        )
    }

    /// True for the punctuality tiers assigned from check-in windows.
    pub fn is_punctuality(&self) -> bool {
        matches!(
            self,
            DailyStatus::OnTime | DailyStatus::Stage1Late | DailyStatus::Stage2Late
        )
    }
}

impl std::fmt::Display for DailyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// How the raw code on an attendance event should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStatus {
    /// The event already carries a known status code.
    Explicit(DailyStatus),
    /// The event says "present" without a punctuality tier; classify by time.
    Unclassified,
    /// Free text that is neither a code nor a presence word.
    Unrecognised,
}

const PRESENCE_WORDS: [&str; 3] = ["hadir", "masuk", "present"];

/// Classifies an event's raw status code.
///
/// A missing or blank code reads as an unclassified presence: the event
/// itself is the evidence of attendance.
pub fn classify_raw_code(raw: Option<&str>) -> RawStatus {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return RawStatus::Unclassified;
    };
    if PRESENCE_WORDS.iter().any(|w| raw.eq_ignore_ascii_case(w)) {
        return RawStatus::Unclassified;
    }
    match DailyStatus::from_code(raw) {
        Some(DailyStatus::NotApplicable) | None => RawStatus::Unrecognised,
        Some(status) => RawStatus::Explicit(status),
    }
}

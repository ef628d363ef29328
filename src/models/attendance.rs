//! Attendance event model.
//!
//! This module defines [`AttendanceEvent`] and [`Direction`], plus the lenient
//! time-of-day parsing used everywhere a recorded time is read.

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Whether an event records arrival or departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Arrival (datang).
    CheckIn,
    /// Departure (pulang).
    CheckOut,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::CheckIn => write!(f, "check_in"),
            Direction::CheckOut => write!(f, "check_out"),
        }
    }
}

/// A single scanned or manually entered attendance event.
///
/// The time is kept as the raw recorded string; use [`AttendanceEvent::parsed_time`]
/// to read it. Unparsable times behave exactly like missing ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// Identifier of the person the event belongs to.
    pub identifier: String,
    /// The calendar date of the event.
    pub date: NaiveDate,
    /// Recorded time of day, e.g. `"07:25"` or `"07:25:13"`.
    #[serde(default)]
    pub time_of_day: Option<String>,
    /// Check-in or check-out.
    pub direction: Direction,
    /// Pre-classified status code (`"TW"`) or free text (`"hadir"`).
    #[serde(default)]
    pub raw_status_code: Option<String>,
}

impl AttendanceEvent {
    /// Returns the event time, or `None` if missing or malformed.
    pub fn parsed_time(&self) -> Option<NaiveTime> {
        self.time_of_day.as_deref().and_then(parse_time_of_day)
    }

    /// Returns the event time as minutes since midnight.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{AttendanceEvent, Direction};
    /// use chrono::NaiveDate;
    ///
    /// let event = AttendanceEvent {
    ///     identifier: "0045123".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     time_of_day: Some("07:25".to_string()),
    ///     direction: Direction::CheckIn,
    ///     raw_status_code: Some("hadir".to_string()),
    /// };
    /// assert_eq!(event.minutes_since_midnight(), Some(445));
    /// ```
    pub fn minutes_since_midnight(&self) -> Option<u32> {
        self.parsed_time().map(minutes_since_midnight)
    }
}

/// Parses a recorded time of day.
///
/// Accepts `HH:MM`, `HH:MM:SS` and the dotted `HH.MM` / `HH.MM.SS` forms some
/// scanners emit. Anything else yields `None`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    ["%H:%M:%S", "%H:%M", "%H.%M.%S", "%H.%M"]
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
}

/// Minutes elapsed since midnight, ignoring seconds.
pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_event(time: Option<&str>) -> AttendanceEvent {
        AttendanceEvent {
            identifier: "0045123".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time_of_day: time.map(str::to_string),
            direction: Direction::CheckIn,
            raw_status_code: None,
        }
    }

    #[test]
    fn test_parse_hour_minute() {
        assert_eq!(
            parse_time_of_day("07:25"),
            NaiveTime::from_hms_opt(7, 25, 0)
        );
    }

    #[test]
    fn test_parse_with_seconds_and_whitespace() {
        assert_eq!(
            parse_time_of_day(" 06:59:48 "),
            NaiveTime::from_hms_opt(6, 59, 48)
        );
    }

    #[test]
    fn test_parse_dotted_form() {
        assert_eq!(
            parse_time_of_day("07.05"),
            NaiveTime::from_hms_opt(7, 5, 0)
        );
    }

    #[test]
    fn test_malformed_times_are_none() {
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("pagi"), None);
        assert_eq!(parse_time_of_day("25:00"), None);
        assert_eq!(parse_time_of_day("7"), None);
    }

    #[test]
    fn test_minutes_since_midnight_drops_seconds() {
        let event = make_event(Some("07:29:59"));
        assert_eq!(event.minutes_since_midnight(), Some(449));
    }

    #[test]
    fn test_missing_time_has_no_minutes() {
        assert_eq!(make_event(None).minutes_since_midnight(), None);
        assert_eq!(make_event(Some("--:--")).minutes_since_midnight(), None);
    }

    #[test]
    fn test_direction_serialization() {
        let json = serde_json::to_string(&Direction::CheckOut).unwrap();
        assert_eq!(json, "\"check_out\"");
        assert_eq!(Direction::CheckIn.to_string(), "check_in");
    }
}

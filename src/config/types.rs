//! Configuration types for attendance derivation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::TimeWindowRule;

/// How non-school weekdays are recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarMode {
    /// A weekday is a school day only if the institution recorded activity on it.
    #[default]
    Heuristic,
    /// Every weekday is a school day unless listed as a holiday.
    Explicit,
}

/// The school calendar: weekend days and explicit holiday exceptions.
///
/// Listed holidays are non-school days in both modes, even if stray
/// attendance events exist on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolCalendar {
    /// How unlisted weekdays are classified.
    #[serde(default)]
    pub mode: CalendarMode,
    /// Days of the week without school.
    #[serde(default = "default_weekend")]
    pub weekend: Vec<Weekday>,
    /// Explicit non-school dates.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

fn default_weekend() -> Vec<Weekday> {
    vec![Weekday::Sat, Weekday::Sun]
}

impl Default for SchoolCalendar {
    fn default() -> Self {
        Self {
            mode: CalendarMode::default(),
            weekend: default_weekend(),
            holidays: Vec::new(),
        }
    }
}

impl SchoolCalendar {
    /// Returns true if `date` falls on a configured weekend day.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend.contains(&date.weekday())
    }

    /// Returns true if `date` is listed as a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}

/// Time-window configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeWindowsConfig {
    /// Check-in windows for all categories and positions.
    #[serde(default)]
    pub windows: Vec<TimeWindowRule>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Default check-in windows.
    time_windows: Vec<TimeWindowRule>,
    /// The school calendar.
    calendar: SchoolCalendar,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(time_windows: Vec<TimeWindowRule>, calendar: SchoolCalendar) -> Self {
        Self {
            time_windows,
            calendar,
        }
    }

    /// Returns the configured check-in windows in file order.
    pub fn time_windows(&self) -> &[TimeWindowRule] {
        &self.time_windows
    }

    /// Returns the school calendar.
    pub fn calendar(&self) -> &SchoolCalendar {
        &self.calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_default_weekend_is_saturday_and_sunday() {
        let calendar = SchoolCalendar::default();
        // 2026-03-07 is a Saturday, 2026-03-08 a Sunday, 2026-03-09 a Monday
        assert!(calendar.is_weekend(make_date("2026-03-07")));
        assert!(calendar.is_weekend(make_date("2026-03-08")));
        assert!(!calendar.is_weekend(make_date("2026-03-09")));
        assert_eq!(calendar.mode, CalendarMode::Heuristic);
    }

    #[test]
    fn test_deserialize_six_day_week() {
        let yaml = "mode: explicit\nweekend: [sunday]\nholidays: [2026-03-19]\n";
        let calendar: SchoolCalendar = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(calendar.mode, CalendarMode::Explicit);
        assert!(!calendar.is_weekend(make_date("2026-03-07")));
        assert!(calendar.is_holiday(make_date("2026-03-19")));
    }

    #[test]
    fn test_empty_calendar_file_uses_defaults() {
        let calendar: SchoolCalendar = serde_yaml::from_str("{}").unwrap();
        assert_eq!(calendar, SchoolCalendar::default());
    }
}

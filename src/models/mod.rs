//! Core data models for the attendance engine.
//!
//! This module contains the raw records the engine reads and the derived
//! types it produces.

mod attendance;
mod daily_status;
mod date_range;
mod leave;
mod person;
mod ranking;
mod time_window;

pub use attendance::{AttendanceEvent, Direction, minutes_since_midnight, parse_time_of_day};
pub use daily_status::{DailyStatus, RawStatus, classify_raw_code};
pub use date_range::DateRange;
pub use leave::{LeaveRecord, LeaveType};
pub use person::{Person, PersonCategory, normalize_position};
pub use ranking::{
    PersonPeriodSummary, RankingEntry, RankingReport, ReportMode, ScoringMode, StatusCounts,
};
pub use time_window::{PunctualityLabel, TimeWindowRule};

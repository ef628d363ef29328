//! Request types for the attendance engine API.
//!
//! This module defines the JSON request bodies for every endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    AttendanceEvent, DateRange, Direction, LeaveRecord, Person, PersonCategory, ReportMode,
    ScoringMode,
};

/// Request body for `POST /records/import`.
///
/// Every list is optional; persons replace existing persons with the same
/// identifier, events and leave are appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Roster entries.
    #[serde(default)]
    pub persons: Vec<Person>,
    /// Attendance events.
    #[serde(default)]
    pub events: Vec<AttendanceEvent>,
    /// Leave records, keyed by identifier or by legacy display name.
    #[serde(default)]
    pub leaves: Vec<LeaveRecord>,
}

/// Request body for `POST /ranking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingRequest {
    /// Which roster to rank.
    pub category: PersonCategory,
    /// Optional subject or class filter.
    #[serde(default)]
    pub position: Option<String>,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Score polarity.
    pub scoring_mode: ScoringMode,
    /// Which events to read; defaults to check-ins.
    #[serde(default)]
    pub report_mode: ReportMode,
}

impl RankingRequest {
    /// The requested period, unvalidated.
    pub fn range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Request body for `POST /daily-status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStatusRequest {
    /// The person's identifier.
    pub identifier: String,
    /// The date to resolve.
    pub date: NaiveDate,
    /// Which events to read; defaults to check-ins.
    #[serde(default)]
    pub report_mode: ReportMode,
}

/// Request body for `PUT /manual-status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualStatusRequest {
    /// The person's identifier.
    pub identifier: String,
    /// The edited date.
    pub date: NaiveDate,
    /// The edited direction; defaults to check-in.
    #[serde(default = "default_direction")]
    pub direction: Direction,
    /// Status code, long form, or empty to clear.
    pub code: String,
}

fn default_direction() -> Direction {
    Direction::CheckIn
}

//! Punctuality time-window rules.
//!
//! Rules form an unordered set in storage; precedence is applied by the
//! resolver (position-specific before role-wide, listed order within each).

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

use super::attendance::parse_time_of_day;
use super::{DailyStatus, Person, PersonCategory};

/// The punctuality tier a window assigns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunctualityLabel {
    /// Arrived on time.
    OnTime,
    /// First lateness tier.
    Stage1Late,
    /// Second lateness tier.
    Stage2Late,
}

impl PunctualityLabel {
    /// The daily status this label classifies a check-in as.
    pub fn status(&self) -> DailyStatus {
        match self {
            PunctualityLabel::OnTime => DailyStatus::OnTime,
            PunctualityLabel::Stage1Late => DailyStatus::Stage1Late,
            PunctualityLabel::Stage2Late => DailyStatus::Stage2Late,
        }
    }

    /// The label for a punctuality status.
    pub fn from_status(status: DailyStatus) -> Option<PunctualityLabel> {
        match status {
            DailyStatus::OnTime => Some(PunctualityLabel::OnTime),
            DailyStatus::Stage1Late => Some(PunctualityLabel::Stage1Late),
            DailyStatus::Stage2Late => Some(PunctualityLabel::Stage2Late),
            _ => None,
        }
    }
}

/// A half-open `[start, end)` check-in window.
///
/// A rule with a `position_key` applies only to persons holding that
/// position; without one it applies to the whole category.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{PersonCategory, PunctualityLabel, TimeWindowRule};
/// use chrono::NaiveTime;
///
/// let rule = TimeWindowRule {
///     category: PersonCategory::Student,
///     position_key: None,
///     start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
///     label: PunctualityLabel::OnTime,
/// };
/// assert!(rule.contains(NaiveTime::from_hms_opt(7, 29, 0).unwrap()));
/// assert!(!rule.contains(NaiveTime::from_hms_opt(7, 30, 0).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindowRule {
    /// The roster the rule applies to.
    pub category: PersonCategory,
    /// Subject or class label for position-specific rules.
    #[serde(default)]
    pub position_key: Option<String>,
    /// Inclusive window start.
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Exclusive window end.
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    /// The tier assigned to check-ins inside the window.
    pub label: PunctualityLabel,
}

impl TimeWindowRule {
    /// Returns true if `time` falls in `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    /// Returns true if the rule is scoped to a single position.
    pub fn is_position_specific(&self) -> bool {
        self.position_key.is_some()
    }

    /// Returns true if the rule is scoped to `person`'s position.
    pub fn matches_position_of(&self, person: &Person) -> bool {
        self.category == person.category
            && self
                .position_key
                .as_deref()
                .is_some_and(|key| person.matches_position(key))
    }

    /// Returns true if the rule is a role-wide rule for `person`'s category.
    pub fn is_role_wide_for(&self, person: &Person) -> bool {
        self.category == person.category && self.position_key.is_none()
    }

    /// Rejects empty or inverted windows.
    pub fn validate(&self) -> EngineResult<()> {
        if self.start >= self.end {
            return Err(EngineError::InvalidTimeWindow {
                label: format!("{:?}", self.label),
                message: format!(
                    "start {} must be before end {}",
                    self.start.format("%H:%M"),
                    self.end.format("%H:%M")
                ),
            });
        }
        Ok(())
    }
}

/// Serde adapter reading times as `HH:MM` (seconds optional).
mod hhmm {
    use super::*;

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time_of_day(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}

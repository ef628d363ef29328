//! Inclusive date range used by every period query.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive `[start_date, end_date]` range.
///
/// Ranges built through [`DateRange::new`] are always valid; ranges that
/// arrive through deserialization must pass [`DateRange::validate`] before use.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(range.days().count(), 5);
///
/// let reversed = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
/// );
/// assert!(reversed.is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start_date: NaiveDate,
    /// Last day (inclusive).
    pub end_date: NaiveDate,
}

impl DateRange {
    /// Creates a range, failing if `end_date` precedes `start_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> EngineResult<Self> {
        let range = Self {
            start_date,
            end_date,
        };
        range.validate()?;
        Ok(range)
    }

    /// A range covering one day.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    /// Fails with [`EngineError::InvalidDateRange`] if the range is reversed.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date < self.start_date {
            return Err(EngineError::InvalidDateRange {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Returns true if `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every date in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let result = DateRange::new(make_date("2026-03-10"), make_date("2026-03-01"));
        match result {
            Err(EngineError::InvalidDateRange { start, end }) => {
                assert_eq!(start, make_date("2026-03-10"));
                assert_eq!(end, make_date("2026-03-01"));
            }
            other => panic!("Expected InvalidDateRange, got {:?}", other),
        }
    }

    #[test]
    fn test_single_day_range_yields_one_day() {
        let range = DateRange::single(make_date("2026-03-02"));
        assert_eq!(range.days().collect::<Vec<_>>(), vec![make_date("2026-03-02")]);
    }

    #[test]
    fn test_days_cross_month_boundary() {
        let range = DateRange::new(make_date("2026-02-27"), make_date("2026-03-02")).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[1], make_date("2026-02-28"));
        assert_eq!(days[2], make_date("2026-03-01"));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(make_date("2026-03-02"), make_date("2026-03-06")).unwrap();
        assert!(range.contains(make_date("2026-03-02")));
        assert!(range.contains(make_date("2026-03-06")));
        assert!(!range.contains(make_date("2026-03-07")));
    }

    #[test]
    fn test_deserialized_range_must_be_validated() {
        let json = r#"{"start_date": "2026-03-06", "end_date": "2026-03-02"}"#;
        let range: DateRange = serde_json::from_str(json).unwrap();
        assert!(range.validate().is_err());
    }
}

//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions the engine reports. Malformed time strings are
//! deliberately absent here: they degrade to missing data instead of failing.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/time_windows.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/time_windows.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested date range ends before it starts.
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A punctuality window is malformed.
    #[error("Invalid time window '{label}': {message}")]
    InvalidTimeWindow {
        /// The label of the offending window.
        label: String,
        /// A description of the problem.
        message: String,
    },

    /// A status code could not be recognised.
    #[error("Unknown status code: {code}")]
    UnknownStatusCode {
        /// The code as supplied by the caller.
        code: String,
    },

    /// A manual status edit cannot be applied to the requested cell.
    #[error("Cannot set status '{code}' on {direction}: {message}")]
    InvalidManualStatus {
        /// The requested status code.
        code: String,
        /// The direction of the edited cell.
        direction: String,
        /// Why the edit was rejected.
        message: String,
    },

    /// No active person carries the given identifier.
    #[error("Person not found: {identifier}")]
    PersonNotFound {
        /// The identifier that was looked up.
        identifier: String,
    },

    /// The backing record source failed to answer a query or command.
    #[error("Record source unavailable: {message}")]
    SourceUnavailable {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/calendar.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/calendar.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_both_dates() {
        let error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range: end date 2026-03-01 is before start date 2026-03-10"
        );
    }

    #[test]
    fn test_unknown_status_code_displays_code() {
        let error = EngineError::UnknownStatusCode {
            code: "XYZ".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown status code: XYZ");
    }

    #[test]
    fn test_invalid_manual_status_displays_direction() {
        let error = EngineError::InvalidManualStatus {
            code: "TW".to_string(),
            direction: "check_out".to_string(),
            message: "checkout is not punctuality-classified".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot set status 'TW' on check_out: checkout is not punctuality-classified"
        );
    }

    #[test]
    fn test_person_not_found_displays_identifier() {
        let error = EngineError::PersonNotFound {
            identifier: "0045123".to_string(),
        };
        assert_eq!(error.to_string(), "Person not found: 0045123");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_range_error() -> EngineResult<()> {
            Err(EngineError::InvalidDateRange {
                start: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
                end: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_range_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}

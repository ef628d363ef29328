//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::TimeWindowRule;

use super::types::{EngineConfig, SchoolCalendar, TimeWindowsConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── time_windows.yaml   # Check-in punctuality windows
/// └── calendar.yaml       # Weekend days, holidays and calendar mode
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("{} windows configured", loader.time_windows().len());
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any time window is empty or inverted
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let windows_path = path.join("time_windows.yaml");
        let windows = Self::load_yaml::<TimeWindowsConfig>(&windows_path)?.windows;
        for rule in &windows {
            rule.validate()?;
        }

        let calendar_path = path.join("calendar.yaml");
        let calendar = Self::load_yaml::<SchoolCalendar>(&calendar_path)?;

        debug!(
            path = %path.display(),
            windows = windows.len(),
            holidays = calendar.holidays.len(),
            mode = ?calendar.mode,
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(windows, calendar),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configured check-in windows.
    pub fn time_windows(&self) -> &[TimeWindowRule] {
        self.config.time_windows()
    }

    /// Returns the school calendar.
    pub fn calendar(&self) -> &SchoolCalendar {
        self.config.calendar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalendarMode;
    use crate::models::{PersonCategory, PunctualityLabel};
    use chrono::NaiveTime;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert!(!loader.time_windows().is_empty());
        assert_eq!(loader.calendar().mode, CalendarMode::Heuristic);
    }

    #[test]
    fn test_student_on_time_window_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let on_time = loader
            .time_windows()
            .iter()
            .find(|w| {
                w.category == PersonCategory::Student
                    && w.position_key.is_none()
                    && w.label == PunctualityLabel::OnTime
            })
            .expect("student on-time window");

        assert_eq!(on_time.start, time(5, 0));
        assert_eq!(on_time.end, time(7, 0));
    }

    #[test]
    fn test_windows_keep_file_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let teacher_labels: Vec<_> = loader
            .time_windows()
            .iter()
            .filter(|w| w.category == PersonCategory::Teacher && w.position_key.is_none())
            .map(|w| w.label)
            .collect();

        assert_eq!(
            teacher_labels,
            vec![
                PunctualityLabel::OnTime,
                PunctualityLabel::Stage1Late,
                PunctualityLabel::Stage2Late
            ]
        );
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("time_windows.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_from_config_round_trips() {
        let loader = ConfigLoader::from_config(EngineConfig::default());
        assert!(loader.time_windows().is_empty());
        assert_eq!(loader.calendar(), &SchoolCalendar::default());
    }
}

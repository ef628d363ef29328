//! Configuration loading and management for the attendance engine.
//!
//! This module loads check-in time windows and the school calendar from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Calendar mode: {:?}", config.calendar().mode);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CalendarMode, EngineConfig, SchoolCalendar, TimeWindowsConfig};

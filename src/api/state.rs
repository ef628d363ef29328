//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::ConfigLoader;
use crate::service::{AttendanceEngine, StatusChange};
use crate::source::MemoryStore;

/// Shared application state.
///
/// Holds the engine over the in-memory store. The loaded configuration
/// lives on in the engine's calendar and the store's time windows. Queries take a read lock; imports and manual edits take the
/// write lock, so a ranking never observes a half-applied edit.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<AttendanceEngine<MemoryStore>>>,
}

impl AppState {
    /// Creates a state with an empty store seeded from `config`.
    pub fn new(config: ConfigLoader) -> Self {
        let engine = AttendanceEngine::new(
            MemoryStore::new(config.time_windows().to_vec()),
            config.calendar().clone(),
        );
        Self::from_engine(engine)
    }

    /// Like [`AppState::new`], with "today" pinned to `today`.
    pub fn with_today(config: ConfigLoader, today: NaiveDate) -> Self {
        let engine = AttendanceEngine::new(
            MemoryStore::new(config.time_windows().to_vec()),
            config.calendar().clone(),
        )
        .with_today(today);
        Self::from_engine(engine)
    }

    fn from_engine(mut engine: AttendanceEngine<MemoryStore>) -> Self {
        engine.subscribe(|change: &StatusChange| {
            debug!(
                identifier = %change.identifier,
                date = %change.date,
                direction = %change.direction,
                previous = %change.previous,
                current = %change.current,
                "Cell changed"
            );
        });
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Returns the shared engine.
    pub fn engine(&self) -> &RwLock<AttendanceEngine<MemoryStore>> {
        &self.engine
    }
}

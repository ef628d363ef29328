//! The engine host exposed to report views and the HTTP API.
//!
//! [`AttendanceEngine`] answers single-cell and ranking queries over a
//! record source, applies manual edits, and notifies subscribed
//! [`StatusObserver`]s. [`RecomputeGuard`] lets a host discard results of
//! superseded recomputations.

mod engine;
mod generation;
mod observer;

pub use engine::{AttendanceEngine, ENGINE_VERSION};
pub use generation::{Generation, RecomputeGuard};
pub use observer::{StatusChange, StatusObserver, SubscriptionId};

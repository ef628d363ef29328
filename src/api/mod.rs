//! HTTP API module for the attendance engine.
//!
//! This module provides the REST endpoints for importing records, ranking
//! a roster, resolving a single cell and applying manual edits.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DailyStatusRequest, ImportRequest, ManualStatusRequest, RankingRequest};
pub use response::{ApiError, DailyStatusResponse};
pub use state::AppState;

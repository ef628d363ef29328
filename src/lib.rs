//! Attendance Status Derivation & Ranking Engine
//!
//! This crate classifies every person's attendance per school day from
//! check-in/out events, leave records and configurable punctuality windows,
//! aggregates those classifications over a date range, and ranks persons
//! by a composite score in merit or inverted-merit mode.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod source;

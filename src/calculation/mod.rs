//! Calculation logic for the attendance engine.
//!
//! This module contains the pure engine: school day detection, check-in
//! time-window matching, daily status resolution, period aggregation,
//! composite scoring, ranking, and the one-off legacy leave-key migration.
//! Nothing here performs I/O or holds state between calls.

mod composite_score;
mod legacy_leave;
mod period_aggregator;
mod ranking;
mod school_day;
mod status_resolver;
mod time_windows;

pub use composite_score::{NO_DATA_MINUTES, composite_score, effective_check_in_minutes};
pub use legacy_leave::{LeaveKeyMigration, migrate_legacy_leave_keys, normalize_person_name};
pub use period_aggregator::{
    PeriodAggregate, PeriodInput, aggregate_period, attendance_percentage,
    average_check_in_minutes,
};
pub use ranking::{rank_summaries, tier_for_rank};
pub use school_day::{DayKind, classify_day, institution_active_dates, school_days};
pub use status_resolver::{ResolutionContext, resolve_daily_status, resolve_for_report};
pub use time_windows::{applicable_windows, classify_check_in, synthesized_check_in_time};

//! Composite score calculation.
//!
//! This module folds a [`PersonPeriodSummary`] into a single number in
//! either polarity. Inverted-merit is the mirror image of merit: the same
//! counters with the opposite signs, and absences in place of attendance.

use rust_decimal::Decimal;

use crate::models::{PersonPeriodSummary, ScoringMode};

/// Average check-in minutes assumed when a person has no timed check-in.
///
/// It is later than any real minute of day, so an absent person never
/// looks early in either mode.
pub const NO_DATA_MINUTES: u32 = 9999;

/// Weight of attendance percentage (merit) or total absences (inverted).
const PRIMARY_WEIGHT: i64 = 100_000;
/// Weight of on-time days and stage-2 late days.
const TIER_WEIGHT: i64 = 10_000;
/// Weight of stage-1 late days.
const STAGE1_WEIGHT: i64 = 1_000;

/// The summary's average check-in minutes, or [`NO_DATA_MINUTES`].
pub fn effective_check_in_minutes(summary: &PersonPeriodSummary) -> Decimal {
    summary
        .average_check_in_minutes
        .unwrap_or(Decimal::from(NO_DATA_MINUTES))
}

/// Computes the composite score of `summary`.
///
/// # Formulas
///
/// Merit:
///
/// ```text
/// pct * 100000 + on_time * 10000 - stage1 * 1000 - stage2 * 10000
///     + (9999 - avg_minutes) / 100
/// ```
///
/// Inverted merit:
///
/// ```text
/// absences * 100000 - on_time * 10000 + stage1 * 1000 + stage2 * 10000
///     + avg_minutes / 10
/// ```
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::composite_score;
/// use attendance_engine::models::{
///     Person, PersonCategory, PersonPeriodSummary, ScoringMode, StatusCounts,
/// };
/// use rust_decimal::Decimal;
///
/// let summary = PersonPeriodSummary {
///     person: Person {
///         identifier: "0045123".to_string(),
///         name: "Siti Aminah".to_string(),
///         category: PersonCategory::Student,
///         position: None,
///         active: true,
///     },
///     counts: StatusCounts { on_time: 1, ..StatusCounts::default() },
///     total_present_days: 1,
///     attendance_percentage: Decimal::ONE_HUNDRED,
///     average_check_in_minutes: Some(Decimal::from(445)),
/// };
///
/// // 100 * 100000 + 1 * 10000 + (9999 - 445) / 100
/// assert_eq!(
///     composite_score(&summary, ScoringMode::Merit),
///     Decimal::new(1_001_009_554, 2)
/// );
/// ```
pub fn composite_score(summary: &PersonPeriodSummary, mode: ScoringMode) -> Decimal {
    let counts = &summary.counts;
    let on_time = Decimal::from(counts.on_time);
    let stage1 = Decimal::from(counts.stage1_late);
    let stage2 = Decimal::from(counts.stage2_late);
    let avg_minutes = effective_check_in_minutes(summary);

    match mode {
        ScoringMode::Merit => {
            summary.attendance_percentage * Decimal::from(PRIMARY_WEIGHT)
                + on_time * Decimal::from(TIER_WEIGHT)
                - stage1 * Decimal::from(STAGE1_WEIGHT)
                - stage2 * Decimal::from(TIER_WEIGHT)
                + (Decimal::from(NO_DATA_MINUTES) - avg_minutes) / Decimal::from(100)
        }
        ScoringMode::InvertedMerit => {
            Decimal::from(counts.total_absences()) * Decimal::from(PRIMARY_WEIGHT)
                - on_time * Decimal::from(TIER_WEIGHT)
                + stage1 * Decimal::from(STAGE1_WEIGHT)
                + stage2 * Decimal::from(TIER_WEIGHT)
                + avg_minutes / Decimal::from(10)
        }
    }
}

//! Period summary and ranking result models.
//!
//! This module contains the derived per-person [`PersonPeriodSummary`], the
//! ranked [`RankingEntry`], and the [`RankingReport`] envelope returned by
//! a ranking computation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DailyStatus, DateRange, Person};

/// Polarity of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Rewards good attendance ("best performer").
    Merit,
    /// Rewards poor attendance ("worst performer").
    InvertedMerit,
}

/// Which events a report reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    /// Arrivals only (datang).
    #[default]
    CheckIn,
    /// Departures only (pulang).
    CheckOut,
    /// Arrivals, with departures filling in otherwise unexplained days (lengkap).
    Complete,
}

/// Per-status day counters for one person over a period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Days classified [`DailyStatus::OnTime`].
    pub on_time: u32,
    /// Days classified [`DailyStatus::Stage1Late`].
    pub stage1_late: u32,
    /// Days classified [`DailyStatus::Stage2Late`].
    pub stage2_late: u32,
    /// Days classified [`DailyStatus::Present`].
    pub present: u32,
    /// Days classified [`DailyStatus::OffSiteDuty`].
    pub off_site_duty: u32,
    /// Days classified [`DailyStatus::OfficialLeave`].
    pub official_leave: u32,
    /// Days classified [`DailyStatus::Sick`].
    pub sick: u32,
    /// Days classified [`DailyStatus::PaidAbsence`].
    pub paid_absence: u32,
    /// Days classified [`DailyStatus::Unexplained`].
    pub unexplained: u32,
}

impl StatusCounts {
    /// Adds one day of `status`. `NotApplicable` is ignored.
    pub fn record(&mut self, status: DailyStatus) {
        let counter = match status {
            DailyStatus::OnTime => &mut self.on_time,
            DailyStatus::Stage1Late => &mut self.stage1_late,
            DailyStatus::Stage2Late => &mut self.stage2_late,
            DailyStatus::Present => &mut self.present,
            DailyStatus::OffSiteDuty => &mut self.off_site_duty,
            DailyStatus::OfficialLeave => &mut self.official_leave,
            DailyStatus::Sick => &mut self.sick,
            DailyStatus::PaidAbsence => &mut self.paid_absence,
            DailyStatus::Unexplained => &mut self.unexplained,
            DailyStatus::NotApplicable => return,
        };
        *counter += 1;
    }

    /// The counter for `status`; zero for `NotApplicable`.
    pub fn get(&self, status: DailyStatus) -> u32 {
        match status {
            DailyStatus::OnTime => self.on_time,
            DailyStatus::Stage1Late => self.stage1_late,
            DailyStatus::Stage2Late => self.stage2_late,
            DailyStatus::Present => self.present,
            DailyStatus::OffSiteDuty => self.off_site_duty,
            DailyStatus::OfficialLeave => self.official_leave,
            DailyStatus::Sick => self.sick,
            DailyStatus::PaidAbsence => self.paid_absence,
            DailyStatus::Unexplained => self.unexplained,
            DailyStatus::NotApplicable => 0,
        }
    }

    /// Sum over every counter.
    pub fn total(&self) -> u32 {
        DailyStatus::COUNTED.iter().map(|s| self.get(*s)).sum()
    }

    /// Official leave + sick + paid absence + unexplained.
    pub fn total_absences(&self) -> u32 {
        self.official_leave + self.sick + self.paid_absence + self.unexplained
    }
}

/// One person's attendance over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPeriodSummary {
    /// The person summarised.
    pub person: Person,
    /// Day counters per status.
    #[serde(flatten)]
    pub counts: StatusCounts,
    /// Distinct dates resolved to a presence status.
    pub total_present_days: u32,
    /// `min(100, present / active school days * 100)`, two decimal places.
    pub attendance_percentage: Decimal,
    /// Mean check-in minute of day, two decimal places; `None` with no timed check-ins.
    pub average_check_in_minutes: Option<Decimal>,
}

/// A ranked summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// The underlying period summary (including the person).
    #[serde(flatten)]
    pub summary: PersonPeriodSummary,
    /// The composite score in the report's scoring mode.
    pub composite_score: Decimal,
    /// 1-based position.
    pub rank: u32,
    /// Star tier: 5 for first place down to 1 for fifth, 0 below.
    pub tier: u8,
}

impl RankingEntry {
    /// The ranked person.
    pub fn person(&self) -> &Person {
        &self.summary.person
    }
}

/// The result of a ranking computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Engine version that produced the report.
    pub engine_version: String,
    /// The period covered.
    pub range: DateRange,
    /// Score polarity used.
    pub scoring_mode: ScoringMode,
    /// Events read.
    pub report_mode: ReportMode,
    /// Institution-wide school days in the period.
    pub active_school_days: u32,
    /// Entries in rank order.
    pub entries: Vec<RankingEntry>,
}

//! Property tests for the attendance engine.
//!
//! These cover the universal guarantees of aggregation and ranking:
//! - every school day yields exactly one counted status per person
//! - attendance percentage stays within 0..=100
//! - ranking is deterministic and independent of input order
//! - ranks are 1..=n with tiers only for the top five

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use attendance_engine::calculation::{
    PeriodInput, aggregate_period, rank_summaries, school_days, institution_active_dates,
};
use attendance_engine::config::SchoolCalendar;
use attendance_engine::models::{
    AttendanceEvent, DateRange, Direction, LeaveRecord, LeaveType, Person, PersonCategory,
    PunctualityLabel, ReportMode, ScoringMode, TimeWindowRule,
};

// =============================================================================
// Strategies
// =============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 20).unwrap()
}

fn rules() -> Vec<TimeWindowRule> {
    let time = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    vec![
        TimeWindowRule {
            category: PersonCategory::Student,
            position_key: None,
            start: time(6, 0),
            end: time(7, 0),
            label: PunctualityLabel::OnTime,
        },
        TimeWindowRule {
            category: PersonCategory::Student,
            position_key: None,
            start: time(7, 0),
            end: time(7, 30),
            label: PunctualityLabel::Stage1Late,
        },
        TimeWindowRule {
            category: PersonCategory::Student,
            position_key: None,
            start: time(7, 30),
            end: time(8, 0),
            label: PunctualityLabel::Stage2Late,
        },
    ]
}

fn persons(count: usize) -> Vec<Person> {
    (0..count)
        .map(|i| Person {
            identifier: format!("{i:04}"),
            name: format!("Student {}", i % 3),
            category: PersonCategory::Student,
            position: None,
            active: true,
        })
        .collect()
}

fn time_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        (5u32..10, 0u32..60).prop_map(|(h, m)| Some(format!("{h:02}:{m:02}"))),
        Just(None),
        Just(Some("pagi".to_string())),
    ]
}

fn code_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("hadir".to_string())),
        Just(Some("TW".to_string())),
        Just(Some("T2".to_string())),
        Just(Some("S".to_string())),
        Just(Some("??".to_string())),
    ]
}

fn event_strategy(person_count: usize) -> impl Strategy<Value = AttendanceEvent> {
    (
        0..person_count,
        0i64..21,
        time_strategy(),
        any::<bool>(),
        code_strategy(),
    )
        .prop_map(|(person, offset, time_of_day, check_in, code)| AttendanceEvent {
            identifier: format!("{person:04}"),
            date: base_date() + chrono::Duration::days(offset),
            time_of_day,
            direction: if check_in {
                Direction::CheckIn
            } else {
                Direction::CheckOut
            },
            raw_status_code: code,
        })
}

fn leave_strategy(person_count: usize) -> impl Strategy<Value = LeaveRecord> {
    (
        0..person_count,
        0i64..21,
        0i64..4,
        prop_oneof![
            Just(LeaveType::OffSiteDuty),
            Just(LeaveType::Sick),
            Just(LeaveType::OfficialLeave),
            Just(LeaveType::PaidAbsence),
            Just(LeaveType::Other),
        ],
    )
        .prop_map(|(person, offset, length, leave_type)| {
            let start = base_date() + chrono::Duration::days(offset);
            LeaveRecord {
                person_key: format!("{person:04}"),
                start_date: start,
                end_date: Some(start + chrono::Duration::days(length)),
                leave_type,
            }
        })
}

fn mode_strategy() -> impl Strategy<Value = ReportMode> {
    prop_oneof![
        Just(ReportMode::CheckIn),
        Just(ReportMode::CheckOut),
        Just(ReportMode::Complete),
    ]
}

const PERSONS: usize = 6;

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn counters_sum_to_school_days(
        events in prop::collection::vec(event_strategy(PERSONS), 0..60),
        leaves in prop::collection::vec(leave_strategy(PERSONS), 0..10),
        mode in mode_strategy(),
        span in 0i64..21,
    ) {
        let roster = persons(PERSONS);
        let rules = rules();
        let calendar = SchoolCalendar::default();
        let range = DateRange::new(base_date(), base_date() + chrono::Duration::days(span)).unwrap();
        let input = PeriodInput {
            events: &events,
            leaves: &leaves,
            rules: &rules,
            calendar: &calendar,
            today: today(),
        };

        let aggregate = aggregate_period(&roster, range, mode, &input).unwrap();
        let active = institution_active_dates(&events, &leaves, range);
        let expected_days = school_days(range, today(), &calendar, &active).len() as u32;

        prop_assert_eq!(aggregate.active_school_days, expected_days);
        for summary in &aggregate.summaries {
            prop_assert_eq!(summary.counts.total(), expected_days);
            prop_assert!(summary.total_present_days <= expected_days);
            prop_assert!(summary.attendance_percentage >= Decimal::ZERO);
            prop_assert!(summary.attendance_percentage <= Decimal::ONE_HUNDRED);
        }
    }

    #[test]
    fn ranking_is_deterministic_and_order_independent(
        events in prop::collection::vec(event_strategy(PERSONS), 0..60),
        leaves in prop::collection::vec(leave_strategy(PERSONS), 0..10),
        merit in any::<bool>(),
    ) {
        let roster = persons(PERSONS);
        let rules = rules();
        let calendar = SchoolCalendar::default();
        let range = DateRange::new(base_date(), base_date() + chrono::Duration::days(20)).unwrap();
        let input = PeriodInput {
            events: &events,
            leaves: &leaves,
            rules: &rules,
            calendar: &calendar,
            today: today(),
        };
        let scoring = if merit { ScoringMode::Merit } else { ScoringMode::InvertedMerit };

        let summaries = aggregate_period(&roster, range, ReportMode::CheckIn, &input)
            .unwrap()
            .summaries;
        let mut reversed = summaries.clone();
        reversed.reverse();

        let first = rank_summaries(summaries.clone(), scoring);
        let second = rank_summaries(summaries, scoring);
        let from_reversed = rank_summaries(reversed, scoring);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &from_reversed);

        for (index, entry) in first.iter().enumerate() {
            let rank = index as u32 + 1;
            prop_assert_eq!(entry.rank, rank);
            let expected_tier = if rank <= 5 { (6 - rank) as u8 } else { 0 };
            prop_assert_eq!(entry.tier, expected_tier);
        }
        for pair in first.windows(2) {
            prop_assert!(pair[0].composite_score >= pair[1].composite_score);
        }
    }
}

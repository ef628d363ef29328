//! Ranking of period summaries.
//!
//! Summaries are scored, stably sorted by descending score with a
//! mode-specific tie-break chain, and numbered from 1.

use std::cmp::Ordering;

use crate::models::{PersonPeriodSummary, RankingEntry, ScoringMode};

use super::composite_score::{composite_score, effective_check_in_minutes};

/// Number of ranks that receive a tier.
const TIERED_RANKS: u32 = 5;

/// The tier for a 1-based rank: 5 for first place down to 1 for fifth, 0 below.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::tier_for_rank;
///
/// assert_eq!(tier_for_rank(1), 5);
/// assert_eq!(tier_for_rank(5), 1);
/// assert_eq!(tier_for_rank(6), 0);
/// ```
pub fn tier_for_rank(rank: u32) -> u8 {
    if rank == 0 || rank > TIERED_RANKS {
        return 0;
    }
    (TIERED_RANKS + 1 - rank).max(1) as u8
}

/// Scores and orders `summaries`.
///
/// # Behavior
///
/// Entries are sorted by descending composite score. Equal scores fall
/// through the tie-break chain of the mode:
///
/// | Step | Merit | Inverted merit |
/// |---|---|---|
/// | 1 | higher attendance percentage | more absences |
/// | 2 | more on-time days | fewer on-time days |
/// | 3 | fewer stage-1 late days | more stage-1 late days |
/// | 4 | fewer stage-2 late days | more stage-2 late days |
/// | 5 | earlier average check-in | later average check-in |
/// | 6 | name ascending | name ascending |
/// | 7 | identifier ascending | identifier ascending |
///
/// A missing average check-in compares as the no-data sentinel. The sort is
/// stable, so identical input always produces identical output.
pub fn rank_summaries(summaries: Vec<PersonPeriodSummary>, mode: ScoringMode) -> Vec<RankingEntry> {
    let mut scored: Vec<RankingEntry> = summaries
        .into_iter()
        .map(|summary| RankingEntry {
            composite_score: composite_score(&summary, mode),
            summary,
            rank: 0,
            tier: 0,
        })
        .collect();

    scored.sort_by(|a, b| compare_entries(a, b, mode));

    for (index, entry) in scored.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
        entry.tier = tier_for_rank(entry.rank);
    }
    scored
}

/// Orders two scored entries; `Less` means `a` ranks higher.
fn compare_entries(a: &RankingEntry, b: &RankingEntry, mode: ScoringMode) -> Ordering {
    let (sa, sb) = (&a.summary, &b.summary);
    let (ca, cb) = (&sa.counts, &sb.counts);

    let by_mode = match mode {
        ScoringMode::Merit => sb
            .attendance_percentage
            .cmp(&sa.attendance_percentage)
            .then(cb.on_time.cmp(&ca.on_time))
            .then(ca.stage1_late.cmp(&cb.stage1_late))
            .then(ca.stage2_late.cmp(&cb.stage2_late))
            .then(effective_check_in_minutes(sa).cmp(&effective_check_in_minutes(sb))),
        ScoringMode::InvertedMerit => cb
            .total_absences()
            .cmp(&ca.total_absences())
            .then(ca.on_time.cmp(&cb.on_time))
            .then(cb.stage1_late.cmp(&ca.stage1_late))
            .then(cb.stage2_late.cmp(&ca.stage2_late))
            .then(effective_check_in_minutes(sb).cmp(&effective_check_in_minutes(sa))),
    };

    b.composite_score
        .cmp(&a.composite_score)
        .then(by_mode)
        .then_with(|| sa.person.name.cmp(&sb.person.name))
        .then_with(|| sa.person.identifier.cmp(&sb.person.identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, PersonCategory, StatusCounts};
    use rust_decimal::Decimal;

    fn make_summary(
        identifier: &str,
        name: &str,
        counts: StatusCounts,
        pct: Decimal,
        avg: Option<i64>,
    ) -> PersonPeriodSummary {
        PersonPeriodSummary {
            person: Person {
                identifier: identifier.to_string(),
                name: name.to_string(),
                category: PersonCategory::Student,
                position: None,
                active: true,
            },
            counts,
            total_present_days: counts.on_time + counts.stage1_late + counts.stage2_late + counts.present,
            attendance_percentage: pct,
            average_check_in_minutes: avg.map(Decimal::from),
        }
    }

    fn names(entries: &[RankingEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.person().name.as_str()).collect()
    }

    fn perfect(identifier: &str, name: &str) -> PersonPeriodSummary {
        make_summary(
            identifier,
            name,
            StatusCounts {
                on_time: 10,
                ..StatusCounts::default()
            },
            Decimal::ONE_HUNDRED,
            Some(420),
        )
    }

    fn absent(identifier: &str, name: &str) -> PersonPeriodSummary {
        make_summary(
            identifier,
            name,
            StatusCounts {
                unexplained: 10,
                ..StatusCounts::default()
            },
            Decimal::ZERO,
            None,
        )
    }

    // ==========================================================================
    // Tiers
    // ==========================================================================
    #[test]
    fn test_tiers() {
        let tiers: Vec<u8> = (1..=7).map(tier_for_rank).collect();
        assert_eq!(tiers, vec![5, 4, 3, 2, 1, 0, 0]);
        assert_eq!(tier_for_rank(0), 0);
    }

    // ==========================================================================
    // Ordering
    // ==========================================================================
    #[test]
    fn test_modes_are_inverse() {
        let summaries = vec![absent("002", "Budi"), perfect("001", "Ani")];

        let merit = rank_summaries(summaries.clone(), ScoringMode::Merit);
        let inverted = rank_summaries(summaries, ScoringMode::InvertedMerit);

        assert_eq!(names(&merit), vec!["Ani", "Budi"]);
        assert_eq!(names(&inverted), vec!["Budi", "Ani"]);
        assert_eq!(merit[0].rank, 1);
        assert_eq!(merit[0].tier, 5);
        assert_eq!(merit[1].rank, 2);
        assert_eq!(merit[1].tier, 4);
    }

    #[test]
    fn test_equal_scores_fall_back_to_name_then_identifier() {
        let summaries = vec![
            absent("003", "Citra"),
            absent("002", "Ani"),
            absent("001", "Ani"),
        ];

        let ranked = rank_summaries(summaries, ScoringMode::Merit);

        let ids: Vec<&str> = ranked
            .iter()
            .map(|e| e.person().identifier.as_str())
            .collect();
        assert_eq!(ids, vec!["001", "002", "003"]);
        let ranks: Vec<u32> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    fn counts(on_time: u32, stage1_late: u32, stage2_late: u32, unexplained: u32) -> StatusCounts {
        StatusCounts {
            on_time,
            stage1_late,
            stage2_late,
            unexplained,
            ..StatusCounts::default()
        }
    }

    /// Ranks a pair whose composite scores are equal in `mode`.
    fn rank_tied_pair(
        first: PersonPeriodSummary,
        second: PersonPeriodSummary,
        mode: ScoringMode,
    ) -> Vec<String> {
        assert_eq!(composite_score(&first, mode), composite_score(&second, mode));
        let forward = rank_summaries(vec![first.clone(), second.clone()], mode);
        let backward = rank_summaries(vec![second, first], mode);
        assert_eq!(forward, backward);
        forward.iter().map(|e| e.person().name.clone()).collect()
    }

    #[test]
    fn test_merit_tie_prefers_higher_percentage() {
        // 1% * 100000 == 10 on-time days * 10000
        let zaki = make_summary("001", "Zaki", counts(0, 0, 0, 0), Decimal::ONE, None);
        let ani = make_summary("002", "Ani", counts(10, 0, 0, 0), Decimal::ZERO, None);

        assert_eq!(
            rank_tied_pair(ani, zaki, ScoringMode::Merit),
            vec!["Zaki", "Ani"]
        );
    }

    #[test]
    fn test_merit_tie_prefers_more_on_time_days() {
        let zaki = make_summary("001", "Zaki", counts(2, 0, 1, 0), Decimal::from(50), None);
        let ani = make_summary("002", "Ani", counts(1, 0, 0, 0), Decimal::from(50), None);

        assert_eq!(
            rank_tied_pair(ani, zaki, ScoringMode::Merit),
            vec!["Zaki", "Ani"]
        );
    }

    #[test]
    fn test_merit_tie_prefers_fewer_stage1_late_days() {
        let ani = make_summary("001", "Ani", counts(0, 10, 0, 0), Decimal::from(50), None);
        let zaki = make_summary("002", "Zaki", counts(0, 0, 1, 0), Decimal::from(50), None);

        assert_eq!(
            rank_tied_pair(ani, zaki, ScoringMode::Merit),
            vec!["Zaki", "Ani"]
        );
    }

    #[test]
    fn test_inverted_tie_prefers_more_absences() {
        // 1 absence * 100000 == 10 on-time days * 10000
        let zaki = make_summary("001", "Zaki", counts(10, 0, 0, 1), Decimal::ZERO, None);
        let ani = make_summary("002", "Ani", counts(0, 0, 0, 0), Decimal::ZERO, None);

        assert_eq!(
            rank_tied_pair(ani, zaki, ScoringMode::InvertedMerit),
            vec!["Zaki", "Ani"]
        );
    }

    #[test]
    fn test_inverted_tie_prefers_fewer_on_time_days() {
        let ani = make_summary("001", "Ani", counts(1, 0, 1, 0), Decimal::from(50), None);
        let zaki = make_summary("002", "Zaki", counts(0, 0, 0, 0), Decimal::from(50), None);

        assert_eq!(
            rank_tied_pair(ani, zaki, ScoringMode::InvertedMerit),
            vec!["Zaki", "Ani"]
        );
    }

    #[test]
    fn test_inverted_tie_prefers_more_stage1_late_days() {
        let zaki = make_summary("001", "Zaki", counts(0, 10, 0, 0), Decimal::from(50), None);
        let ani = make_summary("002", "Ani", counts(0, 0, 1, 0), Decimal::from(50), None);

        assert_eq!(
            rank_tied_pair(ani, zaki, ScoringMode::InvertedMerit),
            vec!["Zaki", "Ani"]
        );
    }

    #[test]
    fn test_late_days_lower_merit_rank() {
        let punctual = make_summary(
            "001",
            "Zaki",
            StatusCounts {
                on_time: 4,
                ..StatusCounts::default()
            },
            Decimal::from(80),
            Some(430),
        );
        let late = make_summary(
            "002",
            "Ani",
            StatusCounts {
                on_time: 3,
                stage2_late: 1,
                ..StatusCounts::default()
            },
            Decimal::from(80),
            Some(430),
        );

        let merit = rank_summaries(vec![late.clone(), punctual.clone()], ScoringMode::Merit);
        let inverted = rank_summaries(vec![punctual, late], ScoringMode::InvertedMerit);

        assert_eq!(names(&merit), vec!["Zaki", "Ani"]);
        assert_eq!(names(&inverted), vec!["Ani", "Zaki"]);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let summaries: Vec<PersonPeriodSummary> = (0..20)
            .map(|i| {
                let counts = StatusCounts {
                    on_time: i % 4,
                    stage1_late: i % 3,
                    unexplained: i % 5,
                    ..StatusCounts::default()
                };
                make_summary(
                    &format!("{i:03}"),
                    &format!("Person {}", i % 7),
                    counts,
                    Decimal::from(i % 4 * 25),
                    Some(400 + i64::from(i % 6)),
                )
            })
            .collect();

        for mode in [ScoringMode::Merit, ScoringMode::InvertedMerit] {
            let first = rank_summaries(summaries.clone(), mode);
            let mut reversed = summaries.clone();
            reversed.reverse();
            let second = rank_summaries(reversed, mode);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_summaries(Vec::new(), ScoringMode::Merit).is_empty());
    }
}

//! Check-in time-window matching.
//!
//! Position-specific windows are searched before role-wide ones. Within each
//! group the configured order decides, and the first half-open match wins.

use chrono::{Duration, NaiveTime};

use crate::models::{DailyStatus, Person, PunctualityLabel, TimeWindowRule};

/// Iterates the windows that apply to `person`, in precedence order.
pub fn applicable_windows<'a>(
    person: &'a Person,
    rules: &'a [TimeWindowRule],
) -> impl Iterator<Item = &'a TimeWindowRule> + 'a {
    let position_specific = rules.iter().filter(|r| r.matches_position_of(person));
    let role_wide = rules.iter().filter(|r| r.is_role_wide_for(person));
    position_specific.chain(role_wide)
}

/// Classifies a check-in by its time of day.
///
/// An untimed check-in, or one outside every window, is plain
/// [`DailyStatus::Present`].
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::classify_check_in;
/// use attendance_engine::models::{
///     DailyStatus, Person, PersonCategory, PunctualityLabel, TimeWindowRule,
/// };
/// use chrono::NaiveTime;
///
/// let person = Person {
///     identifier: "0045123".to_string(),
///     name: "Siti Aminah".to_string(),
///     category: PersonCategory::Student,
///     position: None,
///     active: true,
/// };
/// let rules = vec![TimeWindowRule {
///     category: PersonCategory::Student,
///     position_key: None,
///     start: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     end: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
///     label: PunctualityLabel::OnTime,
/// }];
///
/// let at = NaiveTime::from_hms_opt(7, 25, 0);
/// assert_eq!(classify_check_in(&person, at, &rules), DailyStatus::OnTime);
/// assert_eq!(classify_check_in(&person, None, &rules), DailyStatus::Present);
/// ```
pub fn classify_check_in(
    person: &Person,
    time: Option<NaiveTime>,
    rules: &[TimeWindowRule],
) -> DailyStatus {
    let Some(time) = time else {
        return DailyStatus::Present;
    };
    applicable_windows(person, rules)
        .find(|rule| rule.contains(time))
        .map(|rule| rule.label.status())
        .unwrap_or(DailyStatus::Present)
}

/// Synthesizes a check-in time consistent with `status` for manual edits.
///
/// Punctuality tiers get the last minute inside the first applicable window
/// carrying that label. [`DailyStatus::Present`] gets the latest window end,
/// which lies outside every window. Returns `None` when no window applies.
pub fn synthesized_check_in_time(
    person: &Person,
    status: DailyStatus,
    rules: &[TimeWindowRule],
) -> Option<NaiveTime> {
    match PunctualityLabel::from_status(status) {
        Some(label) => applicable_windows(person, rules)
            .find(|rule| rule.label == label)
            .map(|rule| (rule.end - Duration::minutes(1)).max(rule.start)),
        None if status == DailyStatus::Present => {
            applicable_windows(person, rules).map(|rule| rule.end).max()
        }
        None => None,
    }
}

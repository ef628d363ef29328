//! Change notification for manual status edits.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{DailyStatus, Direction};

/// A cell that changed through a manual edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    /// The person's identifier.
    pub identifier: String,
    /// The edited date.
    pub date: NaiveDate,
    /// The edited direction.
    pub direction: Direction,
    /// Status before the edit.
    pub previous: DailyStatus,
    /// Status after the edit.
    pub current: DailyStatus,
}

/// Receives [`StatusChange`]s from the engine that owns the subscription.
///
/// Any `Fn(&StatusChange) + Send + Sync` closure is an observer.
pub trait StatusObserver: Send + Sync {
    /// Called once per successful edit, after the source has been updated.
    fn on_status_change(&self, change: &StatusChange);
}

impl<F> StatusObserver for F
where
    F: Fn(&StatusChange) + Send + Sync,
{
    fn on_status_change(&self, change: &StatusChange) {
        self(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The observers registered with one engine, in subscription order.
#[derive(Default, Clone)]
pub(crate) struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Arc<dyn StatusObserver>)>,
}

impl ObserverRegistry {
    pub(crate) fn subscribe(&mut self, observer: Arc<dyn StatusObserver>) -> SubscriptionId {
        let id = SubscriptionId(Uuid::new_v4());
        self.observers.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub(crate) fn notify(&self, change: &StatusChange) {
        for (_, observer) in &self.observers {
            observer.on_status_change(change);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn change() -> StatusChange {
        StatusChange {
            identifier: "0045123".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
            direction: Direction::CheckIn,
            previous: DailyStatus::Unexplained,
            current: DailyStatus::Sick,
        }
    }

    #[test]
    fn test_notify_reaches_every_observer_until_unsubscribed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::default();

        let first = {
            let seen = Arc::clone(&seen);
            registry.subscribe(Arc::new(move |c: &StatusChange| {
                seen.lock().unwrap().push(("first", c.current));
            }))
        };
        {
            let seen = Arc::clone(&seen);
            registry.subscribe(Arc::new(move |c: &StatusChange| {
                seen.lock().unwrap().push(("second", c.current));
            }));
        }

        registry.notify(&change());
        assert!(registry.unsubscribe(first));
        assert!(!registry.unsubscribe(first));
        registry.notify(&change());

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("first", DailyStatus::Sick),
                ("second", DailyStatus::Sick),
                ("second", DailyStatus::Sick)
            ]
        );
        assert_eq!(registry.len(), 1);
    }
}

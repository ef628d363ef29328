//! Recomputation sequencing.
//!
//! A host that starts a new computation whenever its filters change calls
//! [`RecomputeGuard::begin`] for each one and drops any result whose
//! generation is no longer current.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// The sequence number of one recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    /// The raw sequence number.
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing [`Generation`]s.
///
/// # Example
///
/// ```
/// use attendance_engine::service::RecomputeGuard;
///
/// let guard = RecomputeGuard::new();
/// let first = guard.begin();
/// let second = guard.begin();
///
/// assert!(!guard.is_current(first));
/// assert!(guard.is_current(second));
/// ```
#[derive(Debug, Default)]
pub struct RecomputeGuard {
    latest: AtomicU64,
}

impl RecomputeGuard {
    /// Creates a guard with no computation started.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new computation, superseding every earlier one.
    pub fn begin(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Returns true if no computation has started since `generation`.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }

    /// The most recently started generation.
    pub fn latest(&self) -> Generation {
        Generation(self.latest.load(Ordering::Acquire))
    }
}

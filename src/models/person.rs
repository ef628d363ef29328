//! Person model and related types.
//!
//! Persons are owned by the external directory; the engine only reads them.

use serde::{Deserialize, Serialize};

/// The roster a person belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonCategory {
    /// Teaching staff, keyed by NIY.
    Teacher,
    /// Students, keyed by NISN.
    Student,
}

impl std::fmt::Display for PersonCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersonCategory::Teacher => write!(f, "teacher"),
            PersonCategory::Student => write!(f, "student"),
        }
    }
}

/// A teacher or student whose attendance is tracked.
///
/// # Example
///
/// ```
/// use attendance_engine::models::{Person, PersonCategory};
///
/// let person = Person {
///     identifier: "0045123".to_string(),
///     name: "Siti Aminah".to_string(),
///     category: PersonCategory::Student,
///     position: Some("X IPA 1".to_string()),
///     active: true,
/// };
/// assert!(person.matches_position("x ipa 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable key: NIY for teachers, NISN for students. Never empty.
    pub identifier: String,
    /// Display name, used as the final ranking tie-break.
    pub name: String,
    /// Teacher or student.
    pub category: PersonCategory,
    /// Subject (teachers) or class (students) label.
    #[serde(default)]
    pub position: Option<String>,
    /// Inactive persons are excluded from roster queries.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Person {
    /// Returns true if this person's position equals `key` after normalization.
    ///
    /// A person without a position never matches.
    pub fn matches_position(&self, key: &str) -> bool {
        self.position
            .as_deref()
            .is_some_and(|position| normalize_position(position) == normalize_position(key))
    }
}

/// Case-folds and collapses whitespace in a subject or class label.
pub fn normalize_position(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

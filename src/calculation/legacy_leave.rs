//! Legacy leave-key migration.
//!
//! Older leave rows identify the person by display name instead of by
//! identifier. This module rewrites those keys once, where the name
//! identifies exactly one person, and reports the rest.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::models::{LeaveRecord, Person};

/// Honorifics and academic titles dropped before comparing names.
const TITLES: &[&str] = &[
    "dr", "drs", "dra", "ir", "h", "hj", "prof", "bapak", "ibu", "pak", "bu", "s.pd", "m.pd",
    "s.kom", "s.ag", "s.si", "s.e", "s.h", "s.t", "m.si", "m.ag", "m.kom", "s.sos", "s.pd.i",
    "a.md",
];

/// The outcome of a leave-key migration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveKeyMigration {
    /// All input records, in input order, with resolvable keys rewritten.
    pub records: Vec<LeaveRecord>,
    /// Number of records whose key was rewritten.
    pub rewritten: usize,
    /// Distinct keys that matched no identifier and no name.
    pub unmatched: Vec<String>,
    /// Distinct keys whose normalized name matched several persons.
    pub ambiguous: Vec<String>,
}

/// Normalizes a display name for matching: case-folded, commas treated as
/// spaces, titles stripped and whitespace collapsed.
///
/// # Example
///
/// ```
/// use attendance_engine::calculation::normalize_person_name;
///
/// assert_eq!(normalize_person_name("Drs. Budi  Santoso, M.Pd."), "budi santoso");
/// ```
pub fn normalize_person_name(raw: &str) -> String {
    raw.to_lowercase()
        .replace(',', " ")
        .split_whitespace()
        .filter(|token| !TITLES.contains(&token.trim_end_matches('.')))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rewrites name-keyed leave records to person identifiers.
///
/// # Behavior
///
/// - A key that already equals some person's identifier is left alone
/// - A key whose normalized form matches exactly one person's normalized
///   name is replaced by that person's identifier
/// - A key matching several persons is reported as ambiguous and kept
/// - A key matching nobody is reported as unmatched and kept
pub fn migrate_legacy_leave_keys(records: Vec<LeaveRecord>, persons: &[Person]) -> LeaveKeyMigration {
    let identifiers: HashSet<&str> = persons.iter().map(|p| p.identifier.as_str()).collect();

    let mut by_name: HashMap<String, Vec<&str>> = HashMap::new();
    for person in persons {
        by_name
            .entry(normalize_person_name(&person.name))
            .or_default()
            .push(person.identifier.as_str());
    }

    let mut migration = LeaveKeyMigration::default();
    for mut record in records {
        if !identifiers.contains(record.person_key.as_str()) {
            let candidates = by_name
                .get(&normalize_person_name(&record.person_key))
                .map(Vec::as_slice)
                .unwrap_or_default();
            match candidates {
                [identifier] => {
                    record.person_key = identifier.to_string();
                    migration.rewritten += 1;
                }
                [] => push_distinct(&mut migration.unmatched, &record.person_key),
                _ => push_distinct(&mut migration.ambiguous, &record.person_key),
            }
        }
        migration.records.push(record);
    }

    for key in &migration.ambiguous {
        warn!(key = %key, "Leave key matches several persons; left unchanged");
    }
    for key in &migration.unmatched {
        warn!(key = %key, "Leave key matches no person; left unchanged");
    }
    info!(
        records = migration.records.len(),
        rewritten = migration.rewritten,
        unmatched = migration.unmatched.len(),
        ambiguous = migration.ambiguous.len(),
        "Migrated legacy leave keys"
    );

    migration
}

fn push_distinct(keys: &mut Vec<String>, key: &str) {
    if !keys.iter().any(|k| k == key) {
        keys.push(key.to_string());
    }
}

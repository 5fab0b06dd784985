//! Append-only merge rules.
//!
//! The generated JSON is the source of truth for already assigned ids:
//! existing keys keep their position and id forever, new keys are only
//! appended. The validator enforces that rule; the assigner numbers the
//! combined list, which leaves the validated prefix untouched.
use crate::error::MappingError;
use crate::model::{Entry, MappingRecord};
use std::collections::HashSet;

/// Check that `new_keys` extends `existing_keys` without removing or
/// reordering anything.
///
/// Rules:
///   - every existing key must still be present in `new_keys`
///   - the first `existing_keys.len()` entries of `new_keys` must match
///     the existing list exactly
///   - new keys may only appear after all existing keys
pub fn validate_append_only(
    existing_keys: &[String],
    new_keys: &[String],
) -> Result<(), MappingError> {
    let new_set: HashSet<&str> = new_keys.iter().map(String::as_str).collect();
    let mut missing: Vec<String> = existing_keys
        .iter()
        .filter(|key| !new_set.contains(key.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(MappingError::RemovedKeys { keys: missing });
    }

    match new_keys.get(..existing_keys.len()) {
        Some(prefix) if prefix == existing_keys => Ok(()),
        _ => Err(MappingError::ReorderedKeys {
            expected: existing_keys.len(),
        }),
    }
}

/// Number the combined entry list densely from zero in source order.
///
/// All attributes are carried through unchanged. Because the validator
/// guarantees existing keys occupy the leading positions, renumbering
/// reproduces their previous ids exactly.
pub fn assign_ids(entries: Vec<Entry>) -> Vec<MappingRecord> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, fields)| MappingRecord {
            id: index as u64,
            fields,
        })
        .collect()
}

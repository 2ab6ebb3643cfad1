//! Value normalization: alias removal and duplicate checks.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::debug;

use enumstr_common::{Collision, PlanError};

use crate::member::Member;

/// Drop aliases, keeping the first declared member for each value.
///
/// Output keeps declaration order.
#[must_use]
pub fn dedup_by_value(members: &[Member]) -> Vec<Member> {
    let mut seen = FxHashSet::default();
    let mut kept = Vec::with_capacity(members.len());
    for member in members {
        if seen.insert(member.numeric()) {
            kept.push(member.clone());
        } else {
            debug!(
                alias = %member.original_name,
                value = member.numeric(),
                "dropping alias"
            );
        }
    }
    kept
}

/// Fail if two constants share a value. Groups are reported in value order.
pub fn check_duplicate_values(type_name: &str, members: &[Member]) -> Result<(), PlanError> {
    let mut by_value: BTreeMap<i128, Vec<String>> = BTreeMap::new();
    for member in members {
        by_value
            .entry(member.numeric())
            .or_default()
            .push(member.original_name.clone());
    }
    let collisions: Vec<Collision> = by_value
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(value, names)| Collision {
            names,
            key: value.to_string(),
        })
        .collect();
    if collisions.is_empty() {
        return Ok(());
    }
    Err(PlanError::DuplicateValue {
        type_name: type_name.to_string(),
        collisions,
    })
}

/// Fail if two constants render to the same display string. Groups are
/// reported in first-seen order.
pub fn check_duplicate_display_names(
    type_name: &str,
    members: &[Member],
) -> Result<(), PlanError> {
    let mut by_name: IndexMap<&str, Vec<String>> = IndexMap::new();
    for member in members {
        by_name
            .entry(member.display_name.as_str())
            .or_default()
            .push(member.original_name.clone());
    }
    let collisions: Vec<Collision> = by_name
        .into_iter()
        .filter(|(_, names)| names.len() > 1)
        .map(|(display, names)| Collision {
            names,
            key: format!("{display:?}"),
        })
        .collect();
    if collisions.is_empty() {
        return Ok(());
    }
    Err(PlanError::DuplicateDisplayString {
        type_name: type_name.to_string(),
        collisions,
    })
}

/// Canonicalize a member list for planning.
///
/// With marshalers, shared values and shared display strings are fatal,
/// because decoding could not tell the constants apart. Without them,
/// aliases are tolerated and the first declared name wins.
pub fn normalize(
    type_name: &str,
    members: &[Member],
    emit_marshalers: bool,
) -> Result<Vec<Member>, PlanError> {
    if emit_marshalers {
        check_duplicate_values(type_name, members)?;
    }
    let kept = dedup_by_value(members);
    if emit_marshalers {
        check_duplicate_display_names(type_name, &kept)?;
    }
    Ok(kept)
}

#[cfg(test)]
#[path = "../tests/normalize_tests.rs"]
mod tests;

//! Boundary probes and the valid/invalid test matrix.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::member::IntKind;
use crate::runs::Run;

/// One expected behaviour of the generated code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub value: i128,
    pub expected: String,
    pub valid: bool,
    /// Set for valid cases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

/// String produced for a value that is not a declared constant.
#[must_use]
pub fn fallback_string(type_name: &str, value: i128) -> String {
    format!("{type_name}({value})")
}

/// Values just outside the declared set, in ascending order.
///
/// Candidates are the kind's extremes, zero, minus one for signed kinds, and
/// the neighbours just outside every run. Member values and values outside
/// the kind's range are never probes.
#[must_use]
pub fn boundary_probes(runs: &[Run], kind: IntKind, pointer_width: u32) -> Vec<i128> {
    let min = kind.min_value(pointer_width);
    let max = kind.max_value(pointer_width);
    let is_member = |value: i128| runs.iter().any(|run| run.contains(value));

    let mut candidates = BTreeSet::new();
    candidates.insert(min);
    candidates.insert(max);
    candidates.insert(0);
    if kind.is_signed() {
        candidates.insert(-1);
    }
    for run in runs {
        if run.first_value() > min {
            candidates.insert(run.first_value() - 1);
        }
        if run.last_value() < max {
            candidates.insert(run.last_value() + 1);
        }
    }
    candidates
        .into_iter()
        .filter(|&value| !is_member(value))
        .collect()
}

/// Members as valid cases plus boundary probes as invalid ones, by value.
#[must_use]
pub fn synthesize_test_cases(
    type_name: &str,
    runs: &[Run],
    kind: IntKind,
    pointer_width: u32,
) -> Vec<TestCase> {
    let mut seen = FxHashSet::default();
    let mut cases: Vec<TestCase> = runs
        .iter()
        .flat_map(Run::members)
        .filter(|member| seen.insert(member.numeric()))
        .map(|member| TestCase {
            value: member.numeric(),
            expected: member.display_name.clone(),
            valid: true,
            original_name: Some(member.original_name.clone()),
        })
        .collect();
    cases.extend(
        boundary_probes(runs, kind, pointer_width)
            .into_iter()
            .map(|value| TestCase {
                value,
                expected: fallback_string(type_name, value),
                valid: false,
                original_name: None,
            }),
    );
    cases.sort_by_key(|case| case.value);
    cases
}

#[cfg(test)]
#[path = "../tests/probes_tests.rs"]
mod tests;

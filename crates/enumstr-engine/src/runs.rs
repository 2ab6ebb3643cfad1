//! Splitting a member set into maximal runs of consecutive values.

use serde::Serialize;

use crate::member::Member;

/// Members whose values increase by exactly one. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Run {
    members: Vec<Member>,
}

impl Run {
    #[must_use]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn first(&self) -> &Member {
        &self.members[0]
    }

    #[must_use]
    pub fn last(&self) -> &Member {
        &self.members[self.members.len() - 1]
    }

    #[must_use]
    pub fn first_value(&self) -> i128 {
        self.first().numeric()
    }

    #[must_use]
    pub fn last_value(&self) -> i128 {
        self.last().numeric()
    }

    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    #[must_use]
    pub fn contains(&self, value: i128) -> bool {
        self.first_value() <= value && value <= self.last_value()
    }
}

/// Sort deduplicated members by value and cut them into runs.
///
/// Values are compared as `i128`, so signed and unsigned 64-bit extremes
/// order correctly and `prev + 1` never overflows.
#[must_use]
pub fn split_into_runs(mut members: Vec<Member>) -> Vec<Run> {
    members.sort_by_key(Member::numeric);

    let mut runs: Vec<Run> = Vec::new();
    let mut current: Vec<Member> = Vec::new();
    for member in members {
        let extends = current
            .last()
            .is_some_and(|prev| prev.numeric() + 1 == member.numeric());
        if !extends && !current.is_empty() {
            runs.push(Run {
                members: std::mem::take(&mut current),
            });
        }
        current.push(member);
    }
    if !current.is_empty() {
        runs.push(Run { members: current });
    }
    runs
}

#[cfg(test)]
#[path = "../tests/runs_tests.rs"]
mod tests;

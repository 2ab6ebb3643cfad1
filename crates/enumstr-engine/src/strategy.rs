//! Strategy selection for lookup and decode.

use serde::Serialize;

use enumstr_common::limits::{MAX_SWITCH_DECODE_CASES, MAX_SWITCH_RUNS};

/// How a value is mapped to its display string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// One contiguous run: one table indexed by `value - first`.
    SingleRun,
    /// A few runs: ordered range checks, one table per run.
    MultiRun,
    /// Many runs: direct value-to-string lookup.
    SparseMap,
}

impl Strategy {
    #[must_use]
    pub const fn select(run_count: usize) -> Self {
        match run_count {
            0 | 1 => Self::SingleRun,
            n if n <= MAX_SWITCH_RUNS => Self::MultiRun,
            _ => Self::SparseMap,
        }
    }
}

/// How a display string is mapped back to its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DecodeStrategy {
    /// Compare the input against each name in turn.
    Switch,
    /// Hash the input into a string-to-value map.
    Map,
}

impl DecodeStrategy {
    #[must_use]
    pub const fn select(member_count: usize) -> Self {
        if member_count <= MAX_SWITCH_DECODE_CASES {
            Self::Switch
        } else {
            Self::Map
        }
    }
}

#[cfg(test)]
#[path = "../tests/strategy_tests.rs"]
mod tests;

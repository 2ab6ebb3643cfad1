//! Codegen planning: turns runs and a strategy into an `EnumPlan`.
//!
//! The plan is everything an emitter needs: the name tables, the offsets to
//! subtract before indexing, which bounds must be checked, the decode cases
//! and the test matrix. Emitters and the evaluator only switch on the
//! `LookupPlan` tag; they never recompute any of it.

use serde::Serialize;
use tracing::trace;

use enumstr_common::limits::DEFAULT_POINTER_WIDTH;

use crate::member::{IntKind, Member};
use crate::name_table::NameTable;
use crate::probes::{TestCase, synthesize_test_cases};
use crate::runs::Run;
use crate::strategy::{DecodeStrategy, Strategy};

/// Knobs that shape one generation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub trim_prefix: String,
    pub line_comment: bool,
    pub emit_marshalers: bool,
    pub emit_driver_adapter: bool,
    pub emit_tests: bool,
    /// Width of `int`/`uint`/`uintptr` kinds, 32 or 64.
    pub pointer_width: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trim_prefix: String::new(),
            line_comment: false,
            emit_marshalers: true,
            emit_driver_adapter: false,
            emit_tests: true,
            pointer_width: DEFAULT_POINTER_WIDTH,
        }
    }
}

// =============================================================================
// Lookup Plans
// =============================================================================

/// The whole enum is one run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SingleRunPlan {
    pub table: NameTable,
    /// Subtracted from the value before indexing; 0 means none. The
    /// subtraction wraps in the unsigned type of the kind's width, so values
    /// below the run land past its end.
    pub offset: i128,
    /// Whether a negative index must be rejected. Only a signed run that
    /// starts at 0 indexes with the raw, possibly negative, value.
    pub check_negative: bool,
}

/// One range check of a multi-run enum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunBranch {
    pub first: i128,
    pub last: i128,
    pub table: NameTable,
    /// False for an unsigned run starting at 0, where `first <= i` always holds.
    pub check_lower_bound: bool,
}

impl RunBranch {
    /// Single-member runs are matched by equality and need no index array.
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.first == self.last
    }

    /// Whether the branch subtracts `first` before indexing.
    #[must_use]
    pub fn subtracts_offset(&self) -> bool {
        self.first != 0 && !self.is_singleton()
    }

    #[must_use]
    pub fn matches(&self, value: i128) -> bool {
        if self.is_singleton() {
            return value == self.first;
        }
        (!self.check_lower_bound || self.first <= value) && value <= self.last
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MultiRunPlan {
    /// Ordered by `first`.
    pub branches: Vec<RunBranch>,
}

/// One key of a sparse map: the value and its slice of the shared table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MapEntry {
    pub value: i128,
    pub start: usize,
    pub end: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SparseMapPlan {
    /// All runs concatenated in ascending order.
    pub table: NameTable,
    /// Sorted by value.
    pub entries: Vec<MapEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy")]
pub enum LookupPlan {
    SingleRun(SingleRunPlan),
    MultiRun(MultiRunPlan),
    SparseMap(SparseMapPlan),
}

impl LookupPlan {
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::SingleRun(_) => Strategy::SingleRun,
            Self::MultiRun(_) => Strategy::MultiRun,
            Self::SparseMap(_) => Strategy::SparseMap,
        }
    }

    /// Table `i` as referenced by `DecodeCase::table`.
    #[must_use]
    pub fn table(&self, i: usize) -> Option<&NameTable> {
        match self {
            Self::SingleRun(plan) => (i == 0).then_some(&plan.table),
            Self::MultiRun(plan) => plan.branches.get(i).map(|branch| &branch.table),
            Self::SparseMap(plan) => (i == 0).then_some(&plan.table),
        }
    }
}

// =============================================================================
// Decode Plans
// =============================================================================

/// One accepted input string: a slice of a table and the value it decodes to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodeCase {
    pub table: usize,
    pub start: usize,
    pub end: usize,
    pub original_name: String,
    pub value: i128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DecodePlan {
    pub strategy: DecodeStrategy,
    /// In ascending value order.
    pub cases: Vec<DecodeCase>,
}

/// A declared constant whose value the generated code re-asserts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConstantCheck {
    pub original_name: String,
    pub literal: String,
}

impl From<&Member> for ConstantCheck {
    fn from(member: &Member) -> Self {
        Self {
            original_name: member.original_name.clone(),
            literal: member.literal.clone(),
        }
    }
}

/// Everything needed to emit or evaluate one enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumPlan {
    pub type_name: String,
    pub kind: IntKind,
    pub pointer_width: u32,
    pub strategy: Strategy,
    pub run_count: usize,
    pub lookup: LookupPlan,
    pub decode: DecodePlan,
    /// Normalized members in ascending value order.
    pub members: Vec<Member>,
    pub test_cases: Vec<TestCase>,
    pub constant_checks: Vec<ConstantCheck>,
    pub emit_marshalers: bool,
    pub emit_driver_adapter: bool,
    pub emit_tests: bool,
}

// =============================================================================
// Planning
// =============================================================================

/// Build the lookup structure for `strategy` over `runs`.
#[must_use]
pub fn plan_lookup(runs: &[Run], kind: IntKind, strategy: Strategy) -> LookupPlan {
    match strategy {
        Strategy::SingleRun => {
            let (table, offset) = match runs.first() {
                Some(run) => (NameTable::from_members(run.members()), run.first_value()),
                None => (NameTable::build([]), 0),
            };
            LookupPlan::SingleRun(SingleRunPlan {
                table,
                offset,
                check_negative: kind.is_signed() && offset == 0,
            })
        }
        Strategy::MultiRun => {
            let branches = runs
                .iter()
                .map(|run| {
                    let first = run.first_value();
                    trace!(first, last = run.last_value(), len = run.len(), "run branch");
                    RunBranch {
                        first,
                        last: run.last_value(),
                        table: NameTable::from_members(run.members()),
                        check_lower_bound: kind.is_signed() || first != 0,
                    }
                })
                .collect();
            LookupPlan::MultiRun(MultiRunPlan { branches })
        }
        Strategy::SparseMap => {
            let members = runs.iter().flat_map(Run::members);
            let table = NameTable::build(members.clone().map(|m| m.display_name.as_str()));
            let entries = members
                .enumerate()
                .filter_map(|(i, member)| {
                    let (start, end) = table.span(i)?;
                    Some(MapEntry {
                        value: member.numeric(),
                        start,
                        end,
                    })
                })
                .collect();
            LookupPlan::SparseMap(SparseMapPlan { table, entries })
        }
    }
}

/// Plan the string-to-value direction from the same tables as `lookup`.
#[must_use]
pub fn plan_decode(runs: &[Run], lookup: &LookupPlan) -> DecodePlan {
    let member_count = runs.iter().map(Run::len).sum();
    let mut cases = Vec::with_capacity(member_count);
    let mut global = 0;
    for (run_index, run) in runs.iter().enumerate() {
        for (local, member) in run.members().iter().enumerate() {
            let (table, position) = match lookup {
                LookupPlan::MultiRun(_) => (run_index, local),
                LookupPlan::SingleRun(_) | LookupPlan::SparseMap(_) => (0, global),
            };
            global += 1;
            let Some((start, end)) = lookup.table(table).and_then(|t| t.span(position)) else {
                continue;
            };
            cases.push(DecodeCase {
                table,
                start,
                end,
                original_name: member.original_name.clone(),
                value: member.numeric(),
            });
        }
    }
    DecodePlan {
        strategy: DecodeStrategy::select(member_count),
        cases,
    }
}

/// Assemble the full plan for one enumeration.
///
/// `constant_checks` is left empty; it describes the declared constants,
/// which the runs no longer carry.
#[must_use]
pub fn plan(
    type_name: &str,
    kind: IntKind,
    runs: &[Run],
    strategy: Strategy,
    settings: &Settings,
) -> EnumPlan {
    let lookup = plan_lookup(runs, kind, strategy);
    let decode = plan_decode(runs, &lookup);
    let test_cases = synthesize_test_cases(type_name, runs, kind, settings.pointer_width);
    EnumPlan {
        type_name: type_name.to_string(),
        kind,
        pointer_width: settings.pointer_width,
        strategy,
        run_count: runs.len(),
        lookup,
        decode,
        members: runs.iter().flat_map(Run::members).cloned().collect(),
        test_cases,
        constant_checks: Vec::new(),
        emit_marshalers: settings.emit_marshalers,
        emit_driver_adapter: settings.emit_driver_adapter,
        emit_tests: settings.emit_tests,
    }
}

#[cfg(test)]
#[path = "../tests/planner_tests.rs"]
mod tests;

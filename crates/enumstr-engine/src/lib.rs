//! Planning engine for enumstr.
//!
//! Given the constants of one integer enumeration, the engine decides how the
//! value-to-string mapping is laid out and derives everything the generated
//! code needs from that one decision:
//!
//! - `normalize`: alias removal and duplicate checks
//! - `runs`: sorting and splitting into contiguous runs
//! - `strategy`: single run, range switch or sparse map; switch or map decode
//! - `name_table`: packed name strings with minimal-width offset indexes
//! - `planner`: lookup and decode plans with offsets and bound checks
//! - `probes`: boundary values and the test matrix
//! - `eval`: executes a plan in-process

pub mod member;
pub use member::{EnumDecl, IntKind, Member, RawMember, Underlying};

pub mod normalize;

pub mod runs;
pub use runs::{Run, split_into_runs};

pub mod strategy;
pub use strategy::{DecodeStrategy, Strategy};

pub mod name_table;
pub use name_table::{IndexWidth, NameTable};

pub mod planner;
pub use planner::{
    ConstantCheck, DecodeCase, DecodePlan, EnumPlan, LookupPlan, MapEntry, MultiRunPlan,
    RunBranch, Settings, SingleRunPlan, SparseMapPlan,
};

pub mod probes;
pub use probes::{TestCase, fallback_string};

pub mod eval;
pub use eval::{Decoder, VerifyError};

use tracing::{debug, debug_span};

use enumstr_common::PlanError;

/// Plan one enumeration as delivered by a front end.
pub fn plan_enum(decl: &EnumDecl, settings: &Settings) -> Result<EnumPlan, PlanError> {
    let _span = debug_span!("plan_enum", type_name = %decl.type_name).entered();

    let kind = match &decl.underlying {
        Underlying::Integer(kind) => *kind,
        Underlying::Other(underlying) => {
            return Err(PlanError::NonIntegerUnderlyingType {
                type_name: decl.type_name.clone(),
                underlying: underlying.clone(),
            });
        }
    };
    let members = decl
        .members
        .iter()
        .map(|raw| {
            Member::from_raw(
                &decl.type_name,
                raw,
                kind,
                &settings.trim_prefix,
                settings.line_comment,
                settings.pointer_width,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    plan_members(&decl.type_name, &members, settings)
}

/// Plan one enumeration from already-built members in declaration order.
pub fn plan_members(
    type_name: &str,
    members: &[Member],
    settings: &Settings,
) -> Result<EnumPlan, PlanError> {
    let Some(first) = members.first() else {
        return Err(PlanError::NoMembersFound {
            type_name: type_name.to_string(),
        });
    };
    if let Some(odd) = members
        .iter()
        .find(|member| member.kind != first.kind || member.signed != first.signed)
    {
        return Err(PlanError::MixedMemberKinds {
            type_name: type_name.to_string(),
            member: odd.original_name.clone(),
            expected: first.kind.to_string(),
            found: odd.kind.to_string(),
        });
    }
    let kind = first.kind;

    let kept = normalize::normalize(type_name, members, settings.emit_marshalers)?;
    let runs = split_into_runs(kept);
    let strategy = Strategy::select(runs.len());
    debug!(
        type_name,
        members = members.len(),
        runs = runs.len(),
        ?strategy,
        "selected lookup strategy"
    );

    let mut plan = planner::plan(type_name, kind, &runs, strategy, settings);
    plan.constant_checks = members.iter().map(ConstantCheck::from).collect();
    debug!(
        type_name,
        decode = ?plan.decode.strategy,
        test_cases = plan.test_cases.len(),
        "planned enumeration"
    );
    Ok(plan)
}

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
mod test_fixtures;

#[cfg(test)]
#[path = "../tests/plan_enum_tests.rs"]
mod plan_enum_tests;

//! In-process execution of an `EnumPlan`.
//!
//! The evaluator follows the same shape the emitted code does: the same
//! offsets, bound checks and table slices. Inputs are first converted to the
//! enum's integer kind (wrapping), like a cast in the generated code.

use rustc_hash::FxHashMap;
use thiserror::Error;

use enumstr_common::{InvalidValue, MalformedValue};

use crate::planner::{DecodeCase, EnumPlan, LookupPlan};
use crate::probes::fallback_string;
use crate::strategy::DecodeStrategy;

impl EnumPlan {
    fn wrap(&self, value: i128) -> i128 {
        self.kind.wrap(value, self.pointer_width)
    }

    /// Display name of `value`, if it is a declared constant.
    #[must_use]
    pub fn lookup(&self, value: i128) -> Option<&str> {
        let value = self.wrap(value);
        match &self.lookup {
            LookupPlan::SingleRun(plan) => {
                let index = if plan.offset != 0 {
                    self.kind.wrap_unsigned(value - plan.offset, self.pointer_width)
                } else {
                    value
                };
                if plan.check_negative && index < 0 {
                    return None;
                }
                let index = usize::try_from(index).ok()?;
                if index >= plan.table.len() {
                    return None;
                }
                plan.table.get(index)
            }
            LookupPlan::MultiRun(plan) => {
                let branch = plan.branches.iter().find(|branch| branch.matches(value))?;
                if branch.is_singleton() {
                    return branch.table.get(0);
                }
                let index = if branch.subtracts_offset() {
                    self.kind
                        .wrap_unsigned(value - branch.first, self.pointer_width)
                } else {
                    value
                };
                branch.table.get(usize::try_from(index).ok()?)
            }
            LookupPlan::SparseMap(plan) => {
                let at = plan
                    .entries
                    .binary_search_by_key(&value, |entry| entry.value)
                    .ok()?;
                let entry = plan.entries[at];
                plan.table.name().get(entry.start..entry.end)
            }
        }
    }

    #[must_use]
    pub fn is_valid(&self, value: i128) -> bool {
        self.lookup(value).is_some()
    }

    /// The display name, or `TypeName(value)` for undeclared values.
    #[must_use]
    pub fn stringify(&self, value: i128) -> String {
        match self.lookup(value) {
            Some(name) => name.to_string(),
            None => fallback_string(&self.type_name, self.wrap(value)),
        }
    }

    pub fn marshal_text(&self, value: i128) -> Result<&str, InvalidValue> {
        self.lookup(value).ok_or_else(|| InvalidValue {
            type_name: self.type_name.clone(),
            value: self.wrap(value),
        })
    }

    /// The accepted spelling of a decode case.
    #[must_use]
    pub fn case_text(&self, case: &DecodeCase) -> Option<&str> {
        self.lookup
            .table(case.table)?
            .name()
            .get(case.start..case.end)
    }

    #[must_use]
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(self)
    }

    /// Parse a display name back into its value.
    pub fn decode(&self, text: &str) -> Result<i128, MalformedValue> {
        self.decoder().decode(text)
    }

    /// Run the plan against its own test matrix.
    pub fn verify(&self) -> Result<(), VerifyError> {
        let decoder = self.decoder();
        for case in &self.test_cases {
            let found = self.stringify(case.value);
            if found != case.expected || self.is_valid(case.value) != case.valid {
                return Err(VerifyError::Stringify {
                    type_name: self.type_name.clone(),
                    value: case.value,
                    expected: case.expected.clone(),
                    found,
                });
            }
            if !self.emit_marshalers || !case.valid {
                continue;
            }
            match decoder.decode(&case.expected) {
                Ok(decoded) if decoded == case.value => {}
                _ => {
                    return Err(VerifyError::Decode {
                        type_name: self.type_name.clone(),
                        text: case.expected.clone(),
                        expected: case.value,
                    });
                }
            }
        }
        Ok(())
    }
}

/// A plan that disagrees with its own test matrix.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VerifyError {
    #[error("{type_name}: value {value} renders as {found:?}, expected {expected:?}")]
    Stringify {
        type_name: String,
        value: i128,
        expected: String,
        found: String,
    },
    #[error("{type_name}: {text:?} does not decode to {expected}")]
    Decode {
        type_name: String,
        text: String,
        expected: i128,
    },
}

/// String-to-value decoding for one plan.
///
/// A map-decode plan hashes its cases once up front; a switch-decode plan
/// compares the input against each case in order.
pub struct Decoder<'a> {
    plan: &'a EnumPlan,
    map: Option<FxHashMap<&'a str, i128>>,
}

impl<'a> Decoder<'a> {
    #[must_use]
    pub fn new(plan: &'a EnumPlan) -> Self {
        let map = match plan.decode.strategy {
            DecodeStrategy::Switch => None,
            DecodeStrategy::Map => {
                let mut map = FxHashMap::default();
                map.reserve(plan.decode.cases.len());
                for case in &plan.decode.cases {
                    if let Some(text) = plan.case_text(case) {
                        map.entry(text).or_insert(case.value);
                    }
                }
                Some(map)
            }
        };
        Self { plan, map }
    }

    pub fn decode(&self, text: &str) -> Result<i128, MalformedValue> {
        let found = match &self.map {
            Some(map) => map.get(text).copied(),
            None => self
                .plan
                .decode
                .cases
                .iter()
                .find(|case| self.plan.case_text(case) == Some(text))
                .map(|case| case.value),
        };
        found.ok_or_else(|| MalformedValue::new(self.plan.type_name.as_str(), text))
    }
}

#[cfg(test)]
#[path = "../tests/eval_tests.rs"]
mod tests;

//! Planning errors, runtime text errors and the diagnostics rendered from them.
//!
//! `PlanError` is what the engine returns when an enumeration cannot be
//! planned at all. `MalformedValue` and `InvalidValue` are the two failures a
//! planned enumeration can produce at run time, mirrored by the generated code.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::limits::{MALFORMED_INPUT_MAX_LEN, MALFORMED_INPUT_PREFIX_LEN};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Error,
}

/// A rendered problem with one enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: &'static str,
    pub type_name: String,
    pub message_text: String,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(type_name: String, code: &'static str, message: String) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            code,
            type_name,
            message_text: message,
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

// =============================================================================
// Planning Errors
// =============================================================================

/// A set of constants that collide on one key.
///
/// `key` is already formatted: a decimal value for duplicate values, a quoted
/// string for duplicate display strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Collision {
    pub names: Vec<String>,
    pub key: String,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] == {}", self.names.join(" "), self.key)
    }
}

fn join_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Why an enumeration could not be planned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no values defined for type {type_name}")]
    NoMembersFound { type_name: String },

    #[error("can't handle non-integer constant type {type_name} (underlying type {underlying})")]
    NonIntegerUnderlyingType {
        type_name: String,
        underlying: String,
    },

    #[error("constant {member} of type {type_name} is declared as {found}, expected {expected}")]
    MixedMemberKinds {
        type_name: String,
        member: String,
        expected: String,
        found: String,
    },

    #[error("value {value} of constant {member} does not fit type {type_name} ({kind})")]
    ValueOutOfRange {
        type_name: String,
        member: String,
        value: i128,
        kind: String,
    },

    #[error(
        "cannot generate marshal/unmarshal methods for type: {type_name} found duplicate values: {}",
        join_collisions(.collisions)
    )]
    DuplicateValue {
        type_name: String,
        collisions: Vec<Collision>,
    },

    #[error(
        "cannot generate marshal/unmarshal methods for type: {type_name} found values with duplicate strings representations: {}",
        join_collisions(.collisions)
    )]
    DuplicateDisplayString {
        type_name: String,
        collisions: Vec<Collision>,
    },
}

impl PlanError {
    /// Stable code of this error, shown next to the message.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoMembersFound { .. } => "E0001",
            Self::NonIntegerUnderlyingType { .. } => "E0002",
            Self::MixedMemberKinds { .. } => "E0003",
            Self::ValueOutOfRange { .. } => "E0004",
            Self::DuplicateValue { .. } => "E0005",
            Self::DuplicateDisplayString { .. } => "E0006",
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        match self {
            Self::NoMembersFound { type_name }
            | Self::NonIntegerUnderlyingType { type_name, .. }
            | Self::MixedMemberKinds { type_name, .. }
            | Self::ValueOutOfRange { type_name, .. }
            | Self::DuplicateValue { type_name, .. }
            | Self::DuplicateDisplayString { type_name, .. } => type_name,
        }
    }

    #[must_use]
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.type_name().to_string(), self.code(), self.to_string())
    }
}

// =============================================================================
// Runtime Text Errors
// =============================================================================

/// Text that does not name any constant of the enumeration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("malformed {type_name}: {}", truncate_input(.input))]
pub struct MalformedValue {
    pub type_name: String,
    pub input: String,
}

impl MalformedValue {
    #[must_use]
    pub fn new(type_name: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            input: input.into(),
        }
    }
}

/// A value that is not one of the enumeration's constants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid {type_name}: {value}")]
pub struct InvalidValue {
    pub type_name: String,
    pub value: i128,
}

/// Shorten user input for an error message.
///
/// Inputs up to [`MALFORMED_INPUT_MAX_LEN`] characters are returned as-is;
/// longer ones keep their first [`MALFORMED_INPUT_PREFIX_LEN`] characters
/// followed by `...`.
#[must_use]
pub fn truncate_input(input: &str) -> Cow<'_, str> {
    if input.chars().count() <= MALFORMED_INPUT_MAX_LEN {
        return Cow::Borrowed(input);
    }
    let prefix: String = input.chars().take(MALFORMED_INPUT_PREFIX_LEN).collect();
    Cow::Owned(format!("{prefix}..."))
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;

//! Common types shared by the enumstr crates.
//!
//! This crate contains the pieces every layer of the generator agrees on:
//! - Strategy thresholds and truncation limits (`limits`)
//! - Planning errors, runtime text errors and rendered diagnostics (`diagnostics`)

pub mod limits;

pub mod diagnostics;
pub use diagnostics::{
    Collision, Diagnostic, DiagnosticCategory, InvalidValue, MalformedValue, PlanError,
};

//! Rust source emission for enumstr.
//!
//! Renders planned enumerations into one Rust module file: a header, the
//! shared error types, then per type its tables, lookup, validity and text
//! conversions, and optionally a test module.

pub mod source_writer;
pub use source_writer::SourceWriter;

pub mod rust_emit;
pub use rust_emit::emit_type;

pub mod test_emit;
pub use test_emit::emit_tests;

use tracing::debug;

use enumstr_common::limits::{MALFORMED_INPUT_MAX_LEN, MALFORMED_INPUT_PREFIX_LEN};
use enumstr_engine::EnumPlan;

/// File-level emission options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Arguments echoed in the generated header.
    pub command_line: String,
    /// Module path the enumeration types are imported from.
    pub type_path: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            command_line: String::new(),
            type_path: "super".to_string(),
        }
    }
}

/// Render all `plans` into one source file.
#[must_use]
pub fn emit_file(plans: &[EnumPlan], options: &EmitOptions) -> String {
    let mut writer = SourceWriter::new();
    emit_header(&mut writer, plans, options);

    let needs_errors = plans
        .iter()
        .any(|plan| plan.emit_marshalers || plan.emit_driver_adapter);
    let needs_scan = plans.iter().any(|plan| plan.emit_driver_adapter);
    if needs_errors {
        writer.blank_line();
        emit_error_type(&mut writer, needs_scan);
    }
    if needs_scan {
        writer.blank_line();
        emit_scan_source(&mut writer);
    }

    for plan in plans {
        debug!(
            type_name = %plan.type_name,
            strategy = ?plan.strategy,
            tests = plan.emit_tests,
            "emitting type"
        );
        writer.blank_line();
        emit_type(&mut writer, plan);
        writer.blank_line();
        if plan.emit_tests {
            emit_tests(&mut writer, plan);
        } else {
            rust_emit::emit_constant_checks(&mut writer, plan);
        }
    }
    writer.finish()
}

fn emit_header(w: &mut SourceWriter, plans: &[EnumPlan], options: &EmitOptions) {
    let command = if options.command_line.is_empty() {
        "enumstr".to_string()
    } else {
        format!("enumstr {}", options.command_line)
    };
    w.line(&format!("// Code generated by \"{command}\"; DO NOT EDIT."));
    w.blank_line();
    w.line("#![allow(clippy::all, dead_code)]");
    w.blank_line();
    let types: Vec<&str> = plans.iter().map(|plan| plan.type_name.as_str()).collect();
    match types.as_slice() {
        [] => {}
        [single] => w.line(&format!("use {}::{single};", options.type_path)),
        many => w.line(&format!("use {}::{{{}}};", options.type_path, many.join(", "))),
    }
}

fn emit_error_type(w: &mut SourceWriter, with_scan: bool) {
    w.line("/// Error returned by the generated text conversions.");
    w.line("#[derive(Debug, Clone, PartialEq, Eq)]");
    w.block("pub enum EnumTextError", |w| {
        w.line("/// The input does not name a constant.");
        w.line("Malformed { type_name: &'static str, input: String },");
        w.line("/// The value is not a declared constant.");
        w.line("Invalid { type_name: &'static str, value: String },");
        if with_scan {
            w.line("/// The driver handed over a type that cannot hold a name.");
            w.line("Unscannable { type_name: &'static str, source: &'static str },");
        }
    });
    w.blank_line();
    w.block("impl EnumTextError", |w| {
        w.block(
            "fn malformed(type_name: &'static str, input: &str) -> Self",
            |w| {
                w.line(&format!(
                    "let input = if input.chars().count() <= {MALFORMED_INPUT_MAX_LEN} {{"
                ));
                w.line("    input.to_string()");
                w.line("} else {");
                w.line(&format!(
                    "    input.chars().take({MALFORMED_INPUT_PREFIX_LEN}).collect::<String>() + \"...\""
                ));
                w.line("};");
                w.line("Self::Malformed { type_name, input }");
            },
        );
    });
    w.blank_line();
    w.block("impl ::core::fmt::Display for EnumTextError", |w| {
        w.block(
            "fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result",
            |w| {
                w.block("match self", |w| {
                    w.line(
                        "Self::Malformed { type_name, input } => write!(f, \"malformed {type_name}: {input}\"),",
                    );
                    w.line(
                        "Self::Invalid { type_name, value } => write!(f, \"invalid {type_name}: {value}\"),",
                    );
                    if with_scan {
                        w.line("Self::Unscannable { type_name, source } => {");
                        w.line("    write!(f, \"cannot scan type {source} into {type_name}\")");
                        w.line("}");
                    }
                });
            },
        );
    });
    w.blank_line();
    w.line("impl ::std::error::Error for EnumTextError {}");
}

fn emit_scan_source(w: &mut SourceWriter) {
    w.line("/// A value handed back by a database driver.");
    w.line("#[derive(Debug, Clone, Copy)]");
    w.block("pub enum ScanSource<'a>", |w| {
        w.line("Text(&'a str),");
        w.line("Bytes(&'a [u8]),");
        w.line("/// Any other driver type, by name.");
        w.line("Other(&'static str),");
    });
}

#[cfg(test)]
#[path = "../tests/test_fixtures.rs"]
mod test_fixtures;

#[cfg(test)]
#[path = "../tests/emit_file_tests.rs"]
mod tests;

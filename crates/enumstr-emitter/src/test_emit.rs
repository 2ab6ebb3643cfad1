//! Generated `#[cfg(test)]` module for one type.
//!
//! The module replays the plan's test matrix against the generated code and
//! carries the constant drift checks.

use enumstr_engine::{EnumPlan, TestCase};

use crate::rust_emit::{emit_constant_checks, snake_case, str_lit};
use crate::source_writer::SourceWriter;

fn case_value(plan: &EnumPlan, case: &TestCase) -> String {
    match &case.original_name {
        Some(name) => format!("{}::{name}", plan.type_name),
        None => format!("{}({})", plan.type_name, case.value),
    }
}

/// Render the test module of one type.
pub fn emit_tests(writer: &mut SourceWriter, plan: &EnumPlan) {
    let ty = plan.type_name.as_str();
    let snake = snake_case(ty);
    let type_lit = str_lit(ty);

    writer.line("#[cfg(test)]");
    writer.block(&format!("mod {snake}_enumstr_tests"), |w| {
        w.line("use super::*;");
        w.blank_line();
        emit_constant_checks(w, plan);
        w.blank_line();

        w.line(&format!("const CASES: &[({ty}, &str, bool)] = &["));
        w.increase_indent();
        for case in &plan.test_cases {
            w.line(&format!(
                "({}, {}, {}),",
                case_value(plan, case),
                str_lit(&case.expected),
                case.valid
            ));
        }
        w.decrease_indent();
        w.line("];");
        w.blank_line();

        w.line("#[test]");
        w.block(&format!("fn {snake}_valid()"), |w| {
            w.block("for &(value, _, valid) in CASES", |w| {
                w.line("assert_eq!(value.valid(), valid, \"valid() of {}\", value.0);");
            });
        });
        w.blank_line();
        w.line("#[test]");
        w.block(&format!("fn {snake}_display()"), |w| {
            w.block("for &(value, text, _) in CASES", |w| {
                w.line("assert_eq!(value.to_string(), text);");
            });
        });

        if plan.emit_marshalers {
            emit_marshal_tests(w, plan, &snake, &type_lit);
        }
        if plan.emit_driver_adapter {
            emit_driver_tests(w, plan, &snake, &type_lit);
        }
    });
}

fn emit_marshal_tests(w: &mut SourceWriter, plan: &EnumPlan, snake: &str, type_lit: &str) {
    let ty = plan.type_name.as_str();
    w.blank_line();
    w.line("#[test]");
    w.block(&format!("fn {snake}_from_str()"), |w| {
        w.block("for &(value, text, valid) in CASES", |w| {
            w.block(&format!("match text.parse::<{ty}>()"), |w| {
                w.block("Ok(parsed) =>", |w| {
                    w.line("assert!(valid, \"{text:?} should not parse\");");
                    w.line("assert_eq!(parsed.0, value.0);");
                });
                w.block("Err(err) =>", |w| {
                    w.line("assert!(!valid, \"{text:?} should parse: {err}\");");
                    w.line(&format!(
                        "assert_eq!(err, EnumTextError::malformed({type_lit}, text));"
                    ));
                });
            });
        });
    });
    w.blank_line();
    w.line("#[test]");
    w.block(&format!("fn {snake}_from_str_truncates_long_input()"), |w| {
        w.line("let long = \"a\".repeat(256) + \"\\0\";");
        w.block(&format!("match long.parse::<{ty}>()"), |w| {
            w.line("Ok(parsed) => panic!(\"unexpected value {}\", parsed.0),");
            w.line(&format!(
                "Err(err) => assert_eq!(err.to_string(), format!(\"malformed {ty}: {{}}...\", \"a\".repeat(29))),"
            ));
        });
    });
    w.blank_line();
    w.line("#[test]");
    w.block(&format!("fn {snake}_marshal_text()"), |w| {
        w.block("for &(value, text, valid) in CASES", |w| {
            w.block("match value.marshal_text()", |w| {
                w.line("Ok(marshaled) => assert_eq!(marshaled, text),");
                w.line(&format!(
                    "Err(err) => assert_eq!(err.to_string(), format!(\"invalid {ty}: {{}}\", value.0)),"
                ));
            });
            w.line("assert_eq!(value.marshal_text().is_ok(), valid);");
        });
    });
    w.blank_line();
    w.line("#[test]");
    w.block(&format!("fn {snake}_unmarshal_text()"), |w| {
        w.block("for &(value, text, valid) in CASES", |w| {
            w.line(&format!("let mut decoded = {ty}(0);"));
            w.line("assert_eq!(decoded.unmarshal_text(text.as_bytes()).is_ok(), valid);");
            w.line("assert_eq!(decoded.0, if valid { value.0 } else { 0 });");
        });
        if plan.members.iter().all(|member| !member.display_name.is_empty()) {
            w.line(&format!("let mut empty = {ty}(0);"));
            w.line("assert!(empty.unmarshal_text(b\"\").is_err());");
        }
        w.line(&format!("let mut invalid = {ty}(0);"));
        w.line(&format!(
            "assert_eq!(invalid.unmarshal_text(&[0xff, 0xfe]), Err(EnumTextError::malformed({type_lit}, \"\\u{{fffd}}\\u{{fffd}}\")));"
        ));
    });
}

fn emit_driver_tests(w: &mut SourceWriter, plan: &EnumPlan, snake: &str, type_lit: &str) {
    let ty = plan.type_name.as_str();
    w.blank_line();
    w.line("#[test]");
    w.block(&format!("fn {snake}_scan()"), |w| {
        w.block("for &(value, text, valid) in CASES", |w| {
            w.line(&format!("let mut scanned = {ty}(0);"));
            w.line("assert_eq!(scanned.scan(ScanSource::Text(text)).is_ok(), valid);");
            w.line("assert_eq!(scanned.scan(ScanSource::Bytes(text.as_bytes())).is_ok(), valid);");
            w.block("if valid", |w| {
                w.line("assert_eq!(scanned.0, value.0);");
                w.line("assert_eq!(value.driver_value(), Ok(text));");
            });
        });
        w.line(&format!("let mut scanned = {ty}(0);"));
        w.line(&format!(
            "assert_eq!(scanned.scan(ScanSource::Other(\"i64\")), Err(EnumTextError::Unscannable {{ type_name: {type_lit}, source: \"i64\" }}));"
        ));
    });
}

#[cfg(test)]
#[path = "../tests/test_emit_tests.rs"]
mod tests;

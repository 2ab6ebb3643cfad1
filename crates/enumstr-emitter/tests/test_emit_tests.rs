use super::*;
use crate::test_fixtures::{day, plan_with};
use enumstr_engine::{IntKind, Settings};

fn render(plan: &EnumPlan) -> String {
    let mut writer = SourceWriter::new();
    emit_tests(&mut writer, plan);
    writer.finish()
}

#[test]
fn module_holds_the_case_matrix() {
    let out = render(&day());
    assert!(out.starts_with("#[cfg(test)]\nmod day_enumstr_tests {\n    use super::*;\n"));
    assert!(out.contains("const CASES: &[(Day, &str, bool)] = &["));
    assert!(out.contains("        (Day(-2147483648), \"Day(-2147483648)\", false),\n"));
    assert!(out.contains("        (Day::Monday, \"Monday\", true),\n"));
    assert!(out.contains("        (Day(7), \"Day(7)\", false),\n"));
    assert!(out.contains("assert!(Day::Tuesday.0 == 1);"));
}

#[test]
fn marshal_tests_follow_the_flag() {
    let out = render(&day());
    assert!(out.contains("fn day_valid() {"));
    assert!(out.contains("fn day_display() {"));
    assert!(out.contains("fn day_from_str() {"));
    assert!(out.contains("fn day_from_str_truncates_long_input() {"));
    assert!(out.contains("format!(\"malformed Day: {}...\", \"a\".repeat(29))"));
    assert!(out.contains("fn day_marshal_text() {"));
    assert!(out.contains("fn day_unmarshal_text() {"));
    assert!(out.contains("assert!(empty.unmarshal_text(b\"\").is_err());"));
    assert!(!out.contains("fn day_scan()"));

    let settings = Settings {
        emit_marshalers: false,
        ..Settings::default()
    };
    let bare = render(&plan_with("Bare", IntKind::U8, &[("A", 0)], &settings));
    assert!(bare.contains("fn bare_display() {"));
    assert!(!bare.contains("from_str"));
    assert!(!bare.contains("unmarshal_text"));
}

#[test]
fn empty_display_names_skip_the_empty_input_check() {
    let settings = Settings {
        trim_prefix: "Level".to_string(),
        ..Settings::default()
    };
    let members = [
        enumstr_engine::Member::new("Level", 0, IntKind::U8).with_display_name(""),
        enumstr_engine::Member::new("LevelHigh", 1, IntKind::U8).with_display_name("High"),
    ];
    let plan = enumstr_engine::plan_members("Level", &members, &settings).unwrap();
    let out = render(&plan);
    assert!(!out.contains("empty.unmarshal_text"));
    assert!(out.contains("(Level::Level, \"\", true),"));
}

#[test]
fn driver_tests_scan_every_case() {
    let settings = Settings {
        emit_driver_adapter: true,
        ..Settings::default()
    };
    let out = render(&plan_with("PillKind", IntKind::I64, &[("Placebo", 0)], &settings));
    assert!(out.contains("mod pill_kind_enumstr_tests {"));
    assert!(out.contains("fn pill_kind_scan() {"));
    assert!(out.contains("let mut scanned = PillKind(0);"));
    assert!(out.contains(
        "Err(EnumTextError::Unscannable { type_name: \"PillKind\", source: \"i64\" })"
    ));
}

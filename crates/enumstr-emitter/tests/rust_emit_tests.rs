use super::*;
use crate::test_fixtures::{day, gap, owned_plan, plan_with};
use enumstr_engine::Settings;

fn render(plan: &EnumPlan) -> String {
    let mut writer = SourceWriter::new();
    emit_type(&mut writer, plan);
    writer.finish()
}

#[test]
fn snake_case_and_prefixes() {
    assert_eq!(snake_case("Day"), "day");
    assert_eq!(snake_case("PillKind"), "pill_kind");
    assert_eq!(snake_case("HTTPCode"), "httpcode");
    assert_eq!(snake_case("Color2Mode"), "color2_mode");
    assert_eq!(const_prefix("PillKind"), "_PILL_KIND");
}

#[test]
fn string_literals_are_escaped() {
    assert_eq!(str_lit("plain"), "\"plain\"");
    assert_eq!(str_lit("a\"b\\c\n"), "\"a\\\"b\\\\c\\n\"");
}

#[test]
fn single_run_tables_and_bounds() {
    let out = render(&day());
    assert!(out.contains(
        "const _DAY_NAME: &str = \"MondayTuesdayWednesdayThursdayFridaySaturdaySunday\";"
    ));
    assert!(out.contains("const _DAY_INDEX: [u8; 8] = [0, 6, 13, 22, 30, 36, 44, 50];"));
    assert!(out.contains("let i = self.0 as i128;"));
    assert!(out.contains("if i < 0 || i >= 7 {"));
    assert!(out.contains("Some(&_DAY_NAME[_DAY_INDEX[i] as usize.._DAY_INDEX[i + 1] as usize])"));
    assert!(out.contains("i >= 0 && i < 7"));
    assert!(out.contains("None => write!(f, \"Day({})\", self.0),"));
}

#[test]
fn single_run_offset_wraps_in_unsigned_width() {
    let plan = plan_with(
        "Num",
        IntKind::I16,
        &[("M3", -3), ("M2", -2), ("M1", -1)],
        &Settings::default(),
    );
    let out = render(&plan);
    assert!(out.contains("let i = (self.0 as u16).wrapping_sub(-3_i16 as u16) as i128;"));
    assert!(out.contains("if i >= 3 {"));
    assert!(!out.contains("i < 0"));
}

#[test]
fn multi_run_branches() {
    let out = render(&gap());
    assert!(out.contains("const _GAP_NAME_0: &str = \"TwoThree\";"));
    assert!(out.contains("const _GAP_INDEX_0: [u8; 3] = [0, 3, 8];"));
    assert!(out.contains("const _GAP_NAME_1: &str = \"FiveSixSevenEightNine\";"));
    assert!(out.contains("const _GAP_INDEX_1: [u8; 6] = [0, 4, 7, 12, 17, 21];"));
    assert!(out.contains("const _GAP_NAME_2: &str = \"Eleven\";"));
    assert!(!out.contains("_GAP_INDEX_2"));

    assert!(out.contains("if 2 <= i && i <= 3 {"));
    assert!(out.contains("let i = (i as usize).wrapping_sub(2_isize as usize) as usize;"));
    assert!(out.contains("if i == 11 {"));
    assert!(out.contains("return Some(_GAP_NAME_2);"));
    assert!(out.contains("|| (i == 11)"));
}

#[test]
fn unsigned_run_from_zero_has_no_lower_bound() {
    let plan = plan_with(
        "Flag",
        IntKind::U8,
        &[("A", 0), ("B", 1), ("C", 2), ("D", 7), ("E", 8)],
        &Settings::default(),
    );
    let out = render(&plan);
    assert!(out.contains("if i <= 2 {"));
    assert!(out.contains("if 7 <= i && i <= 8 {"));
    assert!(out.contains("let i = (i as u8).wrapping_sub(7_u8 as u8) as usize;"));
}

#[test]
fn wide_signed_run_subtracts_in_unsigned_width() {
    let mut entries: Vec<(String, i128)> = (-100..=100_i128).map(|v| (format!("W{}", v + 100), v)).collect();
    entries.push(("Top".to_string(), 120));
    let plan = owned_plan("Wide", IntKind::I8, &entries);
    assert_eq!(plan.strategy, enumstr_engine::Strategy::MultiRun);
    let out = render(&plan);
    assert!(out.contains("if -100 <= i && i <= 100 {"));
    assert!(out.contains("let i = (i as u8).wrapping_sub(-100_i8 as u8) as usize;"));
    assert!(!out.contains("(i - "));
    assert!(out.contains("const _WIDE_INDEX_0: [u16; 202]"));
}

#[test]
fn sparse_map_matches_on_value() {
    let entries: Vec<(String, i128)> = (0..13).map(|i| (format!("S{i}"), i * 2)).collect();
    let out = render(&owned_plan("Sparse", IntKind::I32, &entries));
    assert!(out.contains("const _SPARSE_NAME: &str = \"S0S1S2S3"));
    assert!(!out.contains("_SPARSE_INDEX"));
    assert!(out.contains("match self.0 {"));
    assert!(out.contains("2 => Some(&_SPARSE_NAME[2..4]),"));
    assert!(out.contains("_ => None,"));
    assert!(out.contains("self.name().is_some()"));
}

#[test]
fn switch_decode_compares_table_slices() {
    let out = render(&gap());
    assert!(out.contains("impl ::core::str::FromStr for Gap {"));
    assert!(out.contains("if s == &_GAP_NAME_1[4..7] {"));
    assert!(out.contains("return Ok(Self::Six);"));
    assert!(out.contains("Err(EnumTextError::malformed(\"Gap\", s))"));
    assert!(!out.contains("_gap_decode_map"));
}

#[test]
fn map_decode_builds_a_lazy_map() {
    let entries: Vec<(String, i128)> = (0..33).map(|i| (format!("V{i}"), i)).collect();
    let out = render(&owned_plan("Wide", IntKind::U16, &entries));
    assert!(out.contains(
        "fn _wide_decode_map() -> &'static ::std::collections::HashMap<&'static str, Wide> {"
    ));
    assert!(out.contains("::std::sync::OnceLock::new();"));
    assert!(out.contains("map.insert(&_WIDE_NAME[0..2], Wide::V0);"));
    assert!(out.contains("_wide_decode_map().get(s).copied()"));
}

#[test]
fn marshalers_can_be_disabled() {
    let settings = Settings {
        emit_marshalers: false,
        ..Settings::default()
    };
    let plan = plan_with("Bare", IntKind::U8, &[("A", 0), ("B", 1)], &settings);
    let out = render(&plan);
    assert!(!out.contains("FromStr"));
    assert!(!out.contains("marshal_text"));
    assert!(out.contains("pub fn valid(self) -> bool {"));
    assert!(out.contains("impl ::core::fmt::Display for Bare {"));
}

#[test]
fn driver_adapter_methods() {
    let settings = Settings {
        emit_driver_adapter: true,
        ..Settings::default()
    };
    let plan = plan_with("Pill", IntKind::I32, &[("Placebo", 0)], &settings);
    let out = render(&plan);
    assert!(out.contains("pub fn driver_value(self) -> Result<&'static str, EnumTextError> {"));
    assert!(out.contains("pub fn scan(&mut self, source: ScanSource<'_>) -> Result<(), EnumTextError> {"));
    assert!(out.contains(
        "ScanSource::Other(source) => Err(EnumTextError::Unscannable { type_name: \"Pill\", source }),"
    ));
}

#[test]
fn constant_checks_assert_every_declared_value() {
    let mut writer = SourceWriter::new();
    emit_constant_checks(&mut writer, &day());
    let out = writer.finish();
    assert!(out.starts_with("// Fails to compile"));
    assert!(out.contains("    assert!(Day::Monday.0 == 0);\n"));
    assert!(out.contains("    assert!(Day::Sunday.0 == 6);\n"));
    assert!(out.ends_with("};\n"));
}

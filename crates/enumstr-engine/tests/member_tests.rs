use super::*;

#[test]
fn parse_accepts_rust_and_go_spellings() {
    assert_eq!(IntKind::parse("i32"), Some(IntKind::I32));
    assert_eq!(IntKind::parse("int32"), Some(IntKind::I32));
    assert_eq!(IntKind::parse("usize"), Some(IntKind::Uint));
    assert_eq!(IntKind::parse("uint"), Some(IntKind::Uint));
    assert_eq!(IntKind::parse("uintptr"), Some(IntKind::Uintptr));
    assert_eq!(IntKind::parse("byte"), Some(IntKind::U8));
    assert_eq!(IntKind::parse("f64"), None);
    assert_eq!(IntKind::parse("string"), None);
}

#[test]
fn underlying_from_name() {
    assert_eq!(
        Underlying::from_name("int8"),
        Underlying::Integer(IntKind::I8)
    );
    assert_eq!(
        Underlying::from_name("float64"),
        Underlying::Other("float64".to_string())
    );
}

#[test]
fn ranges_follow_width_and_sign() {
    assert_eq!(IntKind::I8.min_value(64), -128);
    assert_eq!(IntKind::I8.max_value(64), 127);
    assert_eq!(IntKind::U8.max_value(64), 255);
    assert_eq!(IntKind::I64.min_value(64), i128::from(i64::MIN));
    assert_eq!(IntKind::U64.max_value(64), i128::from(u64::MAX));
    assert_eq!(IntKind::Int.max_value(32), i128::from(i32::MAX));
    assert_eq!(IntKind::Uintptr.max_value(32), i128::from(u32::MAX));
    assert!(IntKind::U16.contains(65_535, 64));
    assert!(!IntKind::U16.contains(65_536, 64));
    assert!(!IntKind::U16.contains(-1, 64));
}

#[test]
fn wrap_behaves_like_a_cast() {
    assert_eq!(IntKind::I8.wrap(128, 64), -128);
    assert_eq!(IntKind::I8.wrap(-129, 64), 127);
    assert_eq!(IntKind::U8.wrap(-1, 64), 255);
    assert_eq!(IntKind::U8.wrap(256, 64), 0);
    assert_eq!(IntKind::I32.wrap(5, 64), 5);
    assert_eq!(
        IntKind::U64.wrap(-1, 64),
        i128::from(u64::MAX)
    );
    assert_eq!(IntKind::Int.wrap(i128::from(i32::MAX) + 1, 32), i128::from(i32::MIN));

    assert_eq!(IntKind::I8.wrap_unsigned(-1, 64), 255);
    assert_eq!(IntKind::I8.wrap_unsigned(0 - -128, 64), 128);
    assert_eq!(IntKind::U16.wrap_unsigned(3 - 5, 64), 65_534);
    assert_eq!(IntKind::I16.unsigned_rust_type(), "u16");
}

#[test]
fn numeric_reads_the_bit_pattern_with_sign() {
    let negative = Member::new("Neg", -1, IntKind::I64);
    assert_eq!(negative.value, u64::MAX);
    assert_eq!(negative.numeric(), -1);

    let big = Member::new("Big", i128::from(u64::MAX), IntKind::U64);
    assert_eq!(big.numeric(), i128::from(u64::MAX));
    assert_eq!(big.literal, "18446744073709551615");
}

fn raw(name: &str, value: i128, comment: Option<&str>) -> RawMember {
    RawMember {
        name: name.to_string(),
        value,
        line_comment: comment.map(str::to_string),
    }
}

#[test]
fn from_raw_trims_prefix() {
    let member =
        Member::from_raw("Color", &raw("ColorRed", 1, None), IntKind::I32, "Color", false, 64)
            .unwrap();
    assert_eq!(member.original_name, "ColorRed");
    assert_eq!(member.display_name, "Red");

    let untouched =
        Member::from_raw("Color", &raw("Blue", 2, None), IntKind::I32, "Color", false, 64)
            .unwrap();
    assert_eq!(untouched.display_name, "Blue");
}

#[test]
fn from_raw_prefers_line_comment_when_enabled() {
    let entry = raw("ColorRed", 1, Some("  crimson red "));
    let with_comment =
        Member::from_raw("Color", &entry, IntKind::I32, "Color", true, 64).unwrap();
    assert_eq!(with_comment.display_name, "crimson red");

    let without = Member::from_raw("Color", &entry, IntKind::I32, "Color", false, 64).unwrap();
    assert_eq!(without.display_name, "Red");
}

#[test]
fn from_raw_rejects_values_outside_the_kind() {
    let err = Member::from_raw("Small", &raw("Big", 300, None), IntKind::U8, "", false, 64)
        .unwrap_err();
    assert_eq!(
        err,
        PlanError::ValueOutOfRange {
            type_name: "Small".to_string(),
            member: "Big".to_string(),
            value: 300,
            kind: "u8".to_string(),
        }
    );
}

#[test]
fn kind_display_uses_rust_names() {
    assert_eq!(IntKind::Int.to_string(), "isize");
    assert_eq!(IntKind::Uint.to_string(), "usize");
    assert_eq!(IntKind::Uintptr.to_string(), "uintptr");
    assert_eq!(IntKind::Uintptr.rust_type(), "usize");
}

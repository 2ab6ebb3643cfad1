//! Enumeration members and their integer kinds.

use std::fmt;

use serde::Serialize;

use enumstr_common::PlanError;

/// Declared integer kind of an enumeration.
///
/// `Int`, `Uint` and `Uintptr` are platform sized; their width is the
/// configured pointer width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Int,
    U8,
    U16,
    U32,
    U64,
    Uint,
    Uintptr,
}

impl IntKind {
    /// Parse a kind name in Rust (`i32`, `usize`) or Go (`int32`, `uint`) spelling.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let kind = match name {
            "i8" | "int8" => Self::I8,
            "i16" | "int16" => Self::I16,
            "i32" | "int32" | "rune" => Self::I32,
            "i64" | "int64" => Self::I64,
            "isize" | "int" => Self::Int,
            "u8" | "uint8" | "byte" => Self::U8,
            "u16" | "uint16" => Self::U16,
            "u32" | "uint32" => Self::U32,
            "u64" | "uint64" => Self::U64,
            "usize" | "uint" => Self::Uint,
            "uintptr" => Self::Uintptr,
            _ => return None,
        };
        Some(kind)
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64 | Self::Int)
    }

    /// Width in bits; platform kinds use `pointer_width`.
    #[must_use]
    pub const fn bits(self, pointer_width: u32) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 => 32,
            Self::I64 | Self::U64 => 64,
            Self::Int | Self::Uint | Self::Uintptr => pointer_width,
        }
    }

    #[must_use]
    pub const fn min_value(self, pointer_width: u32) -> i128 {
        if self.is_signed() {
            -(1i128 << (self.bits(pointer_width) - 1))
        } else {
            0
        }
    }

    #[must_use]
    pub const fn max_value(self, pointer_width: u32) -> i128 {
        let bits = self.bits(pointer_width);
        if self.is_signed() {
            (1i128 << (bits - 1)) - 1
        } else {
            (1i128 << bits) - 1
        }
    }

    #[must_use]
    pub const fn contains(self, value: i128, pointer_width: u32) -> bool {
        self.min_value(pointer_width) <= value && value <= self.max_value(pointer_width)
    }

    /// Reduce `value` modulo 2^bits into the kind's range, the way a
    /// conversion to the fixed-width type would.
    #[must_use]
    pub const fn wrap(self, value: i128, pointer_width: u32) -> i128 {
        let modulus = 1i128 << self.bits(pointer_width);
        let reduced = value.rem_euclid(modulus);
        if self.is_signed() && reduced >= modulus / 2 {
            reduced - modulus
        } else {
            reduced
        }
    }

    /// Reduce `value` modulo 2^bits into `[0, 2^bits)`, the way a conversion
    /// to the unsigned type of the same width would.
    #[must_use]
    pub const fn wrap_unsigned(self, value: i128, pointer_width: u32) -> i128 {
        value.rem_euclid(1i128 << self.bits(pointer_width))
    }

    /// The unsigned primitive with the same width as [`Self::rust_type`].
    #[must_use]
    pub const fn unsigned_rust_type(self) -> &'static str {
        match self {
            Self::I8 | Self::U8 => "u8",
            Self::I16 | Self::U16 => "u16",
            Self::I32 | Self::U32 => "u32",
            Self::I64 | Self::U64 => "u64",
            Self::Int | Self::Uint | Self::Uintptr => "usize",
        }
    }

    /// The Rust primitive the generated code uses for this kind.
    #[must_use]
    pub const fn rust_type(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Int => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Uint | Self::Uintptr => "usize",
        }
    }
}

impl fmt::Display for IntKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uintptr => "uintptr",
            other => other.rust_type(),
        };
        f.write_str(name)
    }
}

/// Underlying type of a declared enumeration, as reported by the front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Underlying {
    Integer(IntKind),
    Other(String),
}

impl Underlying {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match IntKind::parse(name) {
            Some(kind) => Self::Integer(kind),
            None => Self::Other(name.to_string()),
        }
    }
}

/// A constant as delivered by the source-analysis front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMember {
    pub name: String,
    pub value: i128,
    pub line_comment: Option<String>,
}

/// One enumeration with its raw constants in declaration order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumDecl {
    pub type_name: String,
    pub underlying: Underlying,
    pub members: Vec<RawMember>,
}

/// One enumeration constant, ready for planning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Member {
    pub original_name: String,
    pub display_name: String,
    /// Two's-complement bit pattern of the value.
    pub value: u64,
    pub signed: bool,
    pub kind: IntKind,
    /// Decimal text of the value as declared.
    pub literal: String,
}

impl Member {
    #[must_use]
    pub fn new(name: impl Into<String>, value: i128, kind: IntKind) -> Self {
        let original_name = name.into();
        Self {
            display_name: original_name.clone(),
            original_name,
            value: value as u64,
            signed: kind.is_signed(),
            kind,
            literal: value.to_string(),
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Build a member from front-end data, applying the display-name rules.
    ///
    /// A trimmed line comment wins in line-comment mode; otherwise the
    /// configured prefix is stripped from the declared name.
    pub fn from_raw(
        type_name: &str,
        raw: &RawMember,
        kind: IntKind,
        trim_prefix: &str,
        line_comment: bool,
        pointer_width: u32,
    ) -> Result<Self, PlanError> {
        if !kind.contains(raw.value, pointer_width) {
            return Err(PlanError::ValueOutOfRange {
                type_name: type_name.to_string(),
                member: raw.name.clone(),
                value: raw.value,
                kind: kind.to_string(),
            });
        }
        let comment = raw
            .line_comment
            .as_deref()
            .filter(|_| line_comment)
            .map(str::trim)
            .filter(|text| !text.is_empty());
        let display_name = match comment {
            Some(text) => text.to_string(),
            None => raw
                .name
                .strip_prefix(trim_prefix)
                .unwrap_or(&raw.name)
                .to_string(),
        };
        Ok(Self::new(raw.name.clone(), raw.value, kind).with_display_name(display_name))
    }

    /// The value read with the member's signedness.
    #[must_use]
    pub const fn numeric(&self) -> i128 {
        if self.signed {
            self.value as i64 as i128
        } else {
            self.value as i128
        }
    }
}

#[cfg(test)]
#[path = "../tests/member_tests.rs"]
mod tests;

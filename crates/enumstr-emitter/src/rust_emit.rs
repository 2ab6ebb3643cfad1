//! Rust rendering of one `EnumPlan`.
//!
//! The enumeration is expected to be a tuple newtype over its integer kind,
//! `pub struct Day(pub i32)`, deriving `Clone` and `Copy`, with one associated
//! constant per member (`Day::Monday`). Everything below is generated against
//! that shape.

use enumstr_engine::{
    DecodeStrategy, EnumPlan, IntKind, LookupPlan, MultiRunPlan, NameTable, SingleRunPlan,
    SparseMapPlan,
};

use crate::source_writer::SourceWriter;

/// Rust string literal for `text`.
pub(crate) fn str_lit(text: &str) -> String {
    format!("{text:?}")
}

/// `PillKind` becomes `pill_kind`.
pub(crate) fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Prefix of the table constants of one type, e.g. `_DAY`.
pub(crate) fn const_prefix(type_name: &str) -> String {
    format!("_{}", snake_case(type_name).to_ascii_uppercase())
}

/// A typed integer literal usable as a constant expression, e.g. `-3_i16`.
fn typed_lit(value: i128, kind: IntKind) -> String {
    format!("{value}_{}", kind.rust_type())
}

/// Slice expression for `start..end` of a table string.
fn slice_expr(name_const: &str, start: usize, end: usize) -> String {
    format!("&{name_const}[{start}..{end}]")
}

struct TypeEmitter<'a> {
    plan: &'a EnumPlan,
    prefix: String,
    type_lit: String,
}

/// Render the tables, lookup, validity and text conversions of one type.
pub fn emit_type(writer: &mut SourceWriter, plan: &EnumPlan) {
    let emitter = TypeEmitter {
        plan,
        prefix: const_prefix(&plan.type_name),
        type_lit: str_lit(&plan.type_name),
    };
    emitter.emit(writer);
}

impl TypeEmitter<'_> {
    fn ty(&self) -> &str {
        &self.plan.type_name
    }

    fn emit(&self, w: &mut SourceWriter) {
        self.emit_tables(w);
        w.blank_line();
        w.block(&format!("impl {}", self.ty()), |w| {
            self.emit_name_fn(w);
            w.blank_line();
            self.emit_valid_fn(w);
            if self.plan.emit_marshalers {
                w.blank_line();
                self.emit_marshal_fns(w);
            }
            if self.plan.emit_driver_adapter {
                w.blank_line();
                self.emit_driver_fns(w);
            }
        });
        w.blank_line();
        self.emit_display(w);
        if self.plan.emit_marshalers {
            w.blank_line();
            self.emit_from_str(w);
        }
    }

    // =========================================================================
    // Tables
    // =========================================================================

    fn table_consts(&self, w: &mut SourceWriter, suffix: &str, table: &NameTable, with_index: bool) {
        w.line(&format!(
            "const {}_NAME{suffix}: &str = {};",
            self.prefix,
            str_lit(table.name())
        ));
        if with_index {
            let entries: Vec<String> = table.index().iter().map(ToString::to_string).collect();
            w.line(&format!(
                "const {}_INDEX{suffix}: [{}; {}] = [{}];",
                self.prefix,
                table.width().rust_type(),
                table.index().len(),
                entries.join(", ")
            ));
        }
    }

    fn emit_tables(&self, w: &mut SourceWriter) {
        match &self.plan.lookup {
            LookupPlan::SingleRun(single) => self.table_consts(w, "", &single.table, true),
            LookupPlan::MultiRun(multi) => {
                for (i, branch) in multi.branches.iter().enumerate() {
                    self.table_consts(w, &format!("_{i}"), &branch.table, !branch.is_singleton());
                }
            }
            LookupPlan::SparseMap(sparse) => self.table_consts(w, "", &sparse.table, false),
        }
    }

    /// `&_DAY_NAME[_DAY_INDEX[i] as usize.._DAY_INDEX[i + 1] as usize]`
    fn indexed_slice(&self, suffix: &str) -> String {
        let name = format!("{}_NAME{suffix}", self.prefix);
        let index = format!("{}_INDEX{suffix}", self.prefix);
        format!("&{name}[{index}[i] as usize..{index}[i + 1] as usize]")
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    fn emit_name_fn(&self, w: &mut SourceWriter) {
        w.line("/// Display name of the value, if it is a declared constant.");
        w.block("pub fn name(self) -> Option<&'static str>", |w| {
            match &self.plan.lookup {
                LookupPlan::SingleRun(single) => self.single_run_name(w, single),
                LookupPlan::MultiRun(multi) => self.multi_run_name(w, multi),
                LookupPlan::SparseMap(sparse) => self.sparse_map_name(w, sparse),
            }
        });
    }

    /// `let i = ...;` turning the raw value into a table index.
    fn single_run_index(&self, w: &mut SourceWriter, single: &SingleRunPlan) {
        if single.offset == 0 {
            w.line("let i = self.0 as i128;");
        } else {
            let unsigned = self.plan.kind.unsigned_rust_type();
            w.line(&format!(
                "let i = (self.0 as {unsigned}).wrapping_sub({} as {unsigned}) as i128;",
                typed_lit(single.offset, self.plan.kind)
            ));
        }
    }

    fn single_run_name(&self, w: &mut SourceWriter, single: &SingleRunPlan) {
        self.single_run_index(w, single);
        let len = single.table.len();
        let out_of_range = if single.check_negative {
            format!("i < 0 || i >= {len}")
        } else {
            format!("i >= {len}")
        };
        w.block(&format!("if {out_of_range}"), |w| w.line("return None;"));
        w.line("let i = i as usize;");
        w.line(&format!("Some({})", self.indexed_slice("")));
    }

    fn branch_condition(&self, first: i128, last: i128, singleton: bool, lower: bool) -> String {
        if singleton {
            format!("i == {first}")
        } else if lower {
            format!("{first} <= i && i <= {last}")
        } else {
            format!("i <= {last}")
        }
    }

    fn multi_run_name(&self, w: &mut SourceWriter, multi: &MultiRunPlan) {
        w.line("let i = self.0;");
        for (n, branch) in multi.branches.iter().enumerate() {
            let condition = self.branch_condition(
                branch.first,
                branch.last,
                branch.is_singleton(),
                branch.check_lower_bound,
            );
            w.block(&format!("if {condition}"), |w| {
                if branch.is_singleton() {
                    w.line(&format!("return Some({}_NAME_{n});", self.prefix));
                    return;
                }
                if branch.subtracts_offset() {
                    let unsigned = self.plan.kind.unsigned_rust_type();
                    w.line(&format!(
                        "let i = (i as {unsigned}).wrapping_sub({} as {unsigned}) as usize;",
                        typed_lit(branch.first, self.plan.kind)
                    ));
                } else {
                    w.line("let i = i as usize;");
                }
                w.line(&format!("return Some({});", self.indexed_slice(&format!("_{n}"))));
            });
        }
        w.line("None");
    }

    fn sparse_map_name(&self, w: &mut SourceWriter, sparse: &SparseMapPlan) {
        let name_const = format!("{}_NAME", self.prefix);
        w.block("match self.0", |w| {
            for entry in &sparse.entries {
                w.line(&format!(
                    "{} => Some({}),",
                    entry.value,
                    slice_expr(&name_const, entry.start, entry.end)
                ));
            }
            w.line("_ => None,");
        });
    }

    fn emit_valid_fn(&self, w: &mut SourceWriter) {
        w.line("/// Reports whether the value is a declared constant.");
        w.block("pub fn valid(self) -> bool", |w| match &self.plan.lookup {
            LookupPlan::SingleRun(single) => {
                self.single_run_index(w, single);
                let len = single.table.len();
                if single.check_negative {
                    w.line(&format!("i >= 0 && i < {len}"));
                } else {
                    w.line(&format!("i < {len}"));
                }
            }
            LookupPlan::MultiRun(multi) => {
                w.line("let i = self.0;");
                let conditions: Vec<String> = multi
                    .branches
                    .iter()
                    .map(|branch| {
                        let condition = self.branch_condition(
                            branch.first,
                            branch.last,
                            branch.is_singleton(),
                            branch.check_lower_bound,
                        );
                        format!("({condition})")
                    })
                    .collect();
                w.line(&conditions.join("\n    || "));
            }
            LookupPlan::SparseMap(_) => w.line("self.name().is_some()"),
        });
    }

    // =========================================================================
    // Text conversions
    // =========================================================================

    fn emit_display(&self, w: &mut SourceWriter) {
        w.block(&format!("impl ::core::fmt::Display for {}", self.ty()), |w| {
            w.block(
                "fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result",
                |w| {
                    w.block("match self.name()", |w| {
                        w.line("Some(name) => f.write_str(name),");
                        w.line(&format!("None => write!(f, \"{}({{}})\", self.0),", self.ty()));
                    });
                },
            );
        });
    }

    fn emit_marshal_fns(&self, w: &mut SourceWriter) {
        w.line("/// The display name, or an error for undeclared values.");
        w.block(
            "pub fn marshal_text(self) -> Result<&'static str, EnumTextError>",
            |w| {
                w.line(&format!(
                    "self.name().ok_or_else(|| EnumTextError::Invalid {{ type_name: {}, value: self.0.to_string() }})",
                    self.type_lit
                ));
            },
        );
        w.blank_line();
        w.line("/// Parse a display name; `self` is unchanged on error.");
        w.block(
            "pub fn unmarshal_text(&mut self, text: &[u8]) -> Result<(), EnumTextError>",
            |w| {
                w.line("let text = ::core::str::from_utf8(text)");
                w.line(&format!(
                    "    .map_err(|_| EnumTextError::malformed({}, &String::from_utf8_lossy(text)))?;",
                    self.type_lit
                ));
                w.line("*self = text.parse()?;");
                w.line("Ok(())");
            },
        );
    }

    fn emit_from_str(&self, w: &mut SourceWriter) {
        let ty = self.ty();
        if self.plan.decode.strategy == DecodeStrategy::Map {
            self.emit_decode_map(w);
            w.blank_line();
        }
        w.block(&format!("impl ::core::str::FromStr for {ty}"), |w| {
            w.line("type Err = EnumTextError;");
            w.blank_line();
            w.block("fn from_str(s: &str) -> Result<Self, Self::Err>", |w| {
                match self.plan.decode.strategy {
                    DecodeStrategy::Switch => {
                        for case in &self.plan.decode.cases {
                            let slice = slice_expr(&self.case_name_const(case.table), case.start, case.end);
                            w.block(&format!("if s == {slice}"), |w| {
                                w.line(&format!("return Ok(Self::{});", case.original_name));
                            });
                        }
                        w.line(&format!("Err(EnumTextError::malformed({}, s))", self.type_lit));
                    }
                    DecodeStrategy::Map => {
                        w.line(&format!(
                            "{}().get(s).copied().ok_or_else(|| EnumTextError::malformed({}, s))",
                            self.decode_map_fn(),
                            self.type_lit
                        ));
                    }
                }
            });
        });
    }

    fn case_name_const(&self, table: usize) -> String {
        match &self.plan.lookup {
            LookupPlan::MultiRun(_) => format!("{}_NAME_{table}", self.prefix),
            LookupPlan::SingleRun(_) | LookupPlan::SparseMap(_) => format!("{}_NAME", self.prefix),
        }
    }

    fn decode_map_fn(&self) -> String {
        format!("_{}_decode_map", snake_case(self.ty()))
    }

    fn emit_decode_map(&self, w: &mut SourceWriter) {
        let ty = self.ty();
        let map_ty = format!("::std::collections::HashMap<&'static str, {ty}>");
        w.block(
            &format!("fn {}() -> &'static {map_ty}", self.decode_map_fn()),
            |w| {
                w.line(&format!(
                    "static MAP: ::std::sync::OnceLock<{map_ty}> = ::std::sync::OnceLock::new();"
                ));
                w.line("MAP.get_or_init(|| {");
                w.increase_indent();
                w.line(&format!(
                    "let mut map = ::std::collections::HashMap::with_capacity({});",
                    self.plan.decode.cases.len()
                ));
                for case in &self.plan.decode.cases {
                    let slice = slice_expr(&self.case_name_const(case.table), case.start, case.end);
                    w.line(&format!("map.insert({slice}, {ty}::{});", case.original_name));
                }
                w.line("map");
                w.decrease_indent();
                w.line("})");
            },
        );
    }

    // =========================================================================
    // Driver adapter
    // =========================================================================

    fn emit_driver_fns(&self, w: &mut SourceWriter) {
        w.line("/// The value a database driver stores.");
        w.block(
            "pub fn driver_value(self) -> Result<&'static str, EnumTextError>",
            |w| w.line("self.marshal_text()"),
        );
        w.blank_line();
        w.line("/// Read back a value stored by [`Self::driver_value`].");
        w.block(
            "pub fn scan(&mut self, source: ScanSource<'_>) -> Result<(), EnumTextError>",
            |w| {
                w.block("match source", |w| {
                    w.block("ScanSource::Text(text) =>", |w| {
                        w.line("*self = text.parse()?;");
                        w.line("Ok(())");
                    });
                    w.line("ScanSource::Bytes(bytes) => self.unmarshal_text(bytes),");
                    w.line(&format!(
                        "ScanSource::Other(source) => Err(EnumTextError::Unscannable {{ type_name: {}, source }}),",
                        self.type_lit
                    ));
                });
            },
        );
    }

    // =========================================================================
    // Constant checks
    // =========================================================================

    fn emit_constant_checks(&self, w: &mut SourceWriter) {
        if self.plan.constant_checks.is_empty() {
            return;
        }
        w.line("// Fails to compile if a constant changed value since generation.");
        w.line("const _: () = {");
        w.increase_indent();
        for check in &self.plan.constant_checks {
            w.line(&format!(
                "assert!({}::{}.0 == {});",
                self.ty(),
                check.original_name,
                check.literal
            ));
        }
        w.decrease_indent();
        w.line("};");
    }
}

/// Render the constant drift checks of one type.
pub fn emit_constant_checks(writer: &mut SourceWriter, plan: &EnumPlan) {
    TypeEmitter {
        plan,
        prefix: const_prefix(&plan.type_name),
        type_lit: str_lit(&plan.type_name),
    }
    .emit_constant_checks(writer);
}

#[cfg(test)]
#[path = "../tests/rust_emit_tests.rs"]
mod tests;

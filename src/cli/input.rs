//! JSON front end: the enumerations a source analyzer found, one document per run.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::Path;

use enumstr_engine::{EnumDecl, IntKind, RawMember, Underlying};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDocument {
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub enums: Vec<InputEnum>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputEnum {
    pub type_name: String,
    /// Underlying type name, Rust or Go spelling.
    pub kind: String,
    #[serde(default)]
    pub members: Vec<InputMember>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMember {
    pub name: String,
    pub value: InputInt,
    #[serde(default)]
    pub line_comment: Option<String>,
}

/// Any JSON integer in `[i64::MIN, u64::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum InputInt {
    Signed(i64),
    Unsigned(u64),
}

impl InputInt {
    pub fn get(self) -> i128 {
        match self {
            InputInt::Signed(v) => i128::from(v),
            InputInt::Unsigned(v) => i128::from(v),
        }
    }
}

impl InputEnum {
    pub fn to_decl(&self) -> EnumDecl {
        EnumDecl {
            type_name: self.type_name.clone(),
            underlying: Underlying::from_name(self.kind.trim()),
            members: self
                .members
                .iter()
                .map(|member| RawMember {
                    name: member.name.clone(),
                    value: member.value.get(),
                    line_comment: member.line_comment.clone(),
                })
                .collect(),
        }
    }
}

impl InputDocument {
    /// Declarations for `types` in request order, or every enumeration when
    /// `types` is empty. A requested name missing from the document yields a
    /// declaration without members.
    pub fn select(&self, types: &[String]) -> Vec<EnumDecl> {
        let mut by_name: IndexMap<&str, &InputEnum> = IndexMap::new();
        for input in &self.enums {
            by_name.entry(input.type_name.as_str()).or_insert(input);
        }

        if types.is_empty() {
            return by_name.values().map(|input| input.to_decl()).collect();
        }

        let mut seen = FxHashSet::default();
        types
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .map(|name| match by_name.get(name.as_str()) {
                Some(input) => input.to_decl(),
                None => EnumDecl {
                    type_name: name.clone(),
                    underlying: Underlying::Integer(IntKind::Int),
                    members: Vec::new(),
                },
            })
            .collect()
    }
}

pub fn parse_input(source: &str) -> Result<InputDocument> {
    let document = serde_json::from_str(source).context("failed to parse input JSON")?;
    Ok(document)
}

pub fn load_input(path: &Path) -> Result<InputDocument> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input: {}", path.display()))?;
    parse_input(&source).with_context(|| format!("failed to parse input: {}", path.display()))
}

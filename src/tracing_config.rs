//! Tracing configuration for the enumstr binary.
//!
//! Supports three output formats controlled by `ENUMSTR_LOG_FORMAT`:
//!
//! - `text` (default): Standard `tracing-subscriber` flat output
//! - `tree`: Hierarchical indented output via `tracing-tree`, one span per
//!   planned type
//! - `json`: One JSON object per span/event
//!
//! ## Quick start
//!
//! ```bash
//! # Why did this enum end up as a sparse map?
//! ENUMSTR_LOG=debug ENUMSTR_LOG_FORMAT=tree enumstr --type Pill
//!
//! # Per-run detail from the planner only
//! ENUMSTR_LOG="enumstr_engine=trace" enumstr --type Pill
//! ```
//!
//! The subscriber is only initialised when `ENUMSTR_LOG` (or `RUST_LOG`) is
//! set, so normal runs pay nothing for it.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to text.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("ENUMSTR_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `ENUMSTR_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("ENUMSTR_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `ENUMSTR_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr, so `--emit plan` output on stdout stays clean.
pub fn init_tracing() {
    let has_enumstr_log = std::env::var("ENUMSTR_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_enumstr_log && !has_rust_log {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tests;

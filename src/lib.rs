//! enumstr: packed string tables and text conversions for integer enumerations.
//!
//! The workspace is split the way the data flows:
//!
//! - `enumstr-common`: thresholds, errors and diagnostics
//! - `enumstr-engine`: normalization, run splitting, strategy selection,
//!   table building, planning, probes and plan evaluation
//! - `enumstr-emitter`: Rust source for a set of plans
//! - this crate: the JSON front end, configuration and the CLI driver

pub use enumstr_common as common;
pub use enumstr_emitter as emitter;
pub use enumstr_engine as engine;

pub mod cli;
pub mod tracing_config;

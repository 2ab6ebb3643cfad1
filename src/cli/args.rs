use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the enumstr binary.
#[derive(Parser, Debug)]
#[command(
    name = "enumstr",
    version,
    about = "Generate string tables and text conversions for integer enumerations"
)]
pub struct CliArgs {
    /// Comma-separated list of type names; every enumeration in the input when omitted.
    #[arg(short = 't', long = "type", value_delimiter = ',')]
    pub types: Vec<String>,

    /// JSON description of the enumerations (default: enumstr.input.json).
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Output file (default: <input dir>/<first type lowercased>_string.rs).
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Trim this prefix from the constant names when printing them.
    #[arg(long = "trimprefix", alias = "trim-prefix")]
    pub trim_prefix: Option<String>,

    /// Use the trailing line comment as the printed text when present.
    #[arg(long = "linecomment", alias = "line-comment")]
    pub line_comment: bool,

    /// Emit `driver_value` and `scan` for database drivers.
    #[arg(long = "driver-adapter", alias = "driverAdapter")]
    pub driver_adapter: bool,

    /// Skip the text marshalers and the `FromStr` implementation.
    #[arg(long = "no-marshalers")]
    pub no_marshalers: bool,

    /// Skip the generated test module.
    #[arg(long = "no-tests")]
    pub no_tests: bool,

    /// Pointer width for `usize`/`isize`/`uintptr` kinds.
    #[arg(long = "pointer-width", alias = "pointerWidth", value_enum)]
    pub pointer_width: Option<PointerWidth>,

    /// What to write: generated Rust source or the serialized plans.
    #[arg(long, value_enum)]
    pub emit: Option<EmitKind>,

    /// Fail when the output file differs instead of writing it.
    #[arg(long)]
    pub check: bool,

    /// JSON config file with defaults for the options above.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Enable pretty, colored diagnostics (default: on when stderr is a terminal).
    #[arg(long)]
    pub pretty: Option<bool>,

    /// Module path the generated code imports the enumeration types from.
    #[arg(long = "type-path", alias = "typePath")]
    pub type_path: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PointerWidth {
    #[value(name = "32")]
    W32,
    #[value(name = "64")]
    W64,
}

impl PointerWidth {
    pub const fn bits(self) -> u32 {
        match self {
            PointerWidth::W32 => 32,
            PointerWidth::W64 => 64,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EmitKind {
    /// Rust source for the enumerations.
    #[default]
    Code,
    /// The planned tables and test matrix as JSON.
    Plan,
}

impl EmitKind {
    /// Suffix of the default output file name.
    pub const fn file_suffix(self) -> &'static str {
        match self {
            EmitKind::Code => "_string.rs",
            EmitKind::Plan => "_plan.json",
        }
    }
}

use anyhow::{Context, Result, anyhow, bail};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use enumstr_common::limits::DEFAULT_POINTER_WIDTH;
use enumstr_engine::Settings;

use crate::cli::args::{CliArgs, EmitKind};

/// Input file looked up next to the working directory when none is given.
pub const DEFAULT_INPUT: &str = "enumstr.input.json";

/// Accepts both JSON booleans and their common string spellings.
/// A config written by another tool may carry `"lineComment": "true"`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

/// Contents of an `--config` file. Every field mirrors a CLI flag.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EnumstrConfig {
    #[serde(default)]
    pub types: Option<Vec<String>>,
    #[serde(default)]
    pub input: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub trim_prefix: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub line_comment: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub driver_adapter: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub marshalers: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub tests: Option<bool>,
    #[serde(default)]
    pub pointer_width: Option<u32>,
    #[serde(default)]
    pub emit: Option<String>,
    #[serde(default)]
    pub type_path: Option<String>,
}

pub fn parse_config(source: &str) -> Result<EnumstrConfig> {
    let config = serde_json::from_str(source).context("failed to parse config JSON")?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<EnumstrConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Fully resolved options for one generator run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Requested type names; empty means every enumeration in the input.
    pub types: Vec<String>,
    pub input: PathBuf,
    /// Explicit output path; derived from the first planned type otherwise.
    pub output: Option<PathBuf>,
    pub trim_prefix: String,
    pub line_comment: bool,
    pub driver_adapter: bool,
    pub marshalers: bool,
    pub tests: bool,
    pub pointer_width: u32,
    pub emit: EmitKind,
    pub check: bool,
    pub type_path: String,
    /// Arguments echoed in the generated header.
    pub command_line: String,
}

impl GenerateOptions {
    #[must_use]
    pub fn to_settings(&self) -> Settings {
        Settings {
            trim_prefix: self.trim_prefix.clone(),
            line_comment: self.line_comment,
            emit_marshalers: self.marshalers,
            emit_driver_adapter: self.driver_adapter,
            emit_tests: self.tests,
            pointer_width: self.pointer_width,
        }
    }

    /// Where output goes: the explicit path, or `<input dir>/<type>_string.rs`.
    #[must_use]
    pub fn output_path(&self, first_type: &str) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let file_name = format!("{}{}", first_type, self.emit.file_suffix()).to_lowercase();
        match self.input.parent() {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Merge CLI arguments over the optional config file.
///
/// CLI paths are relative to `cwd`; config paths are relative to the config
/// file's directory.
pub fn resolve_options(args: &CliArgs, cwd: &Path) -> Result<GenerateOptions> {
    let (config, config_dir) = match &args.config {
        Some(path) => {
            let path = cwd.join(path);
            let config = load_config(&path)?;
            let dir = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
            (config, dir)
        }
        None => (EnumstrConfig::default(), cwd.to_path_buf()),
    };

    let types = if args.types.is_empty() {
        config.types.clone().unwrap_or_default()
    } else {
        args.types.clone()
    };
    let types: Vec<String> = types
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect();

    let input = match (&args.input, &config.input) {
        (Some(input), _) => cwd.join(input),
        (None, Some(input)) => config_dir.join(input),
        (None, None) => cwd.join(DEFAULT_INPUT),
    };
    let output = match (&args.output, &config.output) {
        (Some(output), _) => Some(cwd.join(output)),
        (None, Some(output)) => Some(config_dir.join(output)),
        (None, None) => None,
    };

    let pointer_width = match args.pointer_width {
        Some(width) => width.bits(),
        None => config.pointer_width.unwrap_or(DEFAULT_POINTER_WIDTH),
    };
    if pointer_width != 32 && pointer_width != 64 {
        bail!("pointer width must be 32 or 64, got {pointer_width}");
    }

    let emit = match (args.emit, config.emit.as_deref()) {
        (Some(emit), _) => emit,
        (None, Some(name)) => EmitKind::from_str(name.trim(), true)
            .map_err(|_| anyhow!("unsupported emit kind '{name}'. Expected code or plan"))?,
        (None, None) => EmitKind::default(),
    };

    let marshalers = !args.no_marshalers && config.marshalers.unwrap_or(true);
    let driver_adapter = args.driver_adapter || config.driver_adapter.unwrap_or(false);
    if driver_adapter && !marshalers {
        bail!("the driver adapter decodes through the text marshalers; it cannot be combined with --no-marshalers");
    }

    Ok(GenerateOptions {
        types,
        input,
        output,
        trim_prefix: args
            .trim_prefix
            .clone()
            .or(config.trim_prefix)
            .unwrap_or_default(),
        line_comment: args.line_comment || config.line_comment.unwrap_or(false),
        driver_adapter,
        marshalers,
        tests: !args.no_tests && config.tests.unwrap_or(true),
        pointer_width,
        emit,
        check: args.check,
        type_path: args
            .type_path
            .clone()
            .or(config.type_path)
            .unwrap_or_else(|| "super".to_string()),
        command_line: String::new(),
    })
}

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, warn};

use enumstr_common::Diagnostic;
use enumstr_emitter::{EmitOptions, emit_file};
use enumstr_engine::{EnumPlan, plan_enum};

use crate::cli::args::{CliArgs, EmitKind};
use crate::cli::config::{GenerateOptions, resolve_options};
use crate::cli::input::load_input;

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
    /// The file was written.
    Written,
    /// `--check`: the file already holds the generated text.
    UpToDate,
    /// `--check`: the file is missing or differs.
    Stale,
    /// Planning failed for at least one type; nothing was written.
    Skipped,
}

#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub diagnostics: Vec<Diagnostic>,
    pub output_path: Option<PathBuf>,
    pub status: OutputStatus,
    /// Names of the planned types, in output order.
    pub type_names: Vec<String>,
}

impl GenerateResult {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self.status {
            OutputStatus::Written | OutputStatus::UpToDate => 0,
            OutputStatus::Stale | OutputStatus::Skipped => 1,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    package: Option<&'a str>,
    plans: &'a [EnumPlan],
}

pub fn generate(args: &CliArgs, cwd: &Path) -> Result<GenerateResult> {
    let options = resolve_options(args, cwd)?;
    generate_with_options(&options)
}

pub fn generate_with_options(options: &GenerateOptions) -> Result<GenerateResult> {
    let document = load_input(&options.input)?;
    let decls = document.select(&options.types);
    if decls.is_empty() {
        bail!("no enumerations found in {}", options.input.display());
    }

    let settings = options.to_settings();
    let outcomes: Vec<_> = decls
        .par_iter()
        .map(|decl| {
            let _span = info_span!("plan", type_name = %decl.type_name).entered();
            plan_enum(decl, &settings)
        })
        .collect();

    let mut plans = Vec::with_capacity(outcomes.len());
    let mut diagnostics = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(plan) => plans.push(plan),
            Err(err) => {
                warn!(type_name = err.type_name(), code = err.code(), "planning failed");
                diagnostics.push(err.to_diagnostic());
            }
        }
    }
    let type_names: Vec<String> = plans.iter().map(|plan| plan.type_name.clone()).collect();
    if !diagnostics.is_empty() {
        return Ok(GenerateResult {
            diagnostics,
            output_path: None,
            status: OutputStatus::Skipped,
            type_names,
        });
    }

    for plan in &plans {
        plan.verify()
            .with_context(|| format!("plan for {} failed its self-check", plan.type_name))?;
    }

    let text = match options.emit {
        EmitKind::Code => emit_file(
            &plans,
            &EmitOptions {
                command_line: options.command_line.clone(),
                type_path: options.type_path.clone(),
            },
        ),
        EmitKind::Plan => {
            let document = PlanDocument {
                package: document.package.as_deref(),
                plans: &plans,
            };
            let mut json =
                serde_json::to_string_pretty(&document).context("failed to serialize plans")?;
            json.push('\n');
            json
        }
    };

    let output_path = options.output_path(&plans[0].type_name);
    let status = if options.check {
        check_output(&output_path, &text)?
    } else {
        write_output(&output_path, &text)?;
        OutputStatus::Written
    };

    Ok(GenerateResult {
        diagnostics,
        output_path: Some(output_path),
        status,
        type_names,
    })
}

fn check_output(path: &Path, expected: &str) -> Result<OutputStatus> {
    let existing = match std::fs::read_to_string(path) {
        Ok(existing) => existing,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "output missing");
            return Ok(OutputStatus::Stale);
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    if existing == expected {
        Ok(OutputStatus::UpToDate)
    } else {
        info!(path = %path.display(), "output is stale");
        Ok(OutputStatus::Stale)
    }
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

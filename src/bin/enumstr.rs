#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use enumstr::cli::args::CliArgs;
use enumstr::cli::config::resolve_options;
use enumstr::cli::driver::{self, OutputStatus};
use enumstr::cli::reporter::Reporter;

fn main() -> Result<()> {
    // No-op unless ENUMSTR_LOG or RUST_LOG is set.
    enumstr::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;

    let mut options = resolve_options(&args, &cwd)?;
    options.command_line = std::env::args().skip(1).collect::<Vec<_>>().join(" ");

    let result = driver::generate_with_options(&options)?;

    if !result.diagnostics.is_empty() {
        let pretty = args.pretty.unwrap_or_else(|| std::io::stderr().is_terminal());
        let reporter = Reporter::new(pretty);
        eprintln!("{}", reporter.render(&result.diagnostics));
        if let Some(summary) = reporter.summary(&result.diagnostics) {
            eprintln!("\n{summary}");
        }
    }

    if result.status == OutputStatus::Stale {
        if let Some(path) = &result.output_path {
            eprintln!("{} is out of date; rerun enumstr without --check", path.display());
        }
    }

    std::process::exit(i32::from(result.exit_code()));
}

// crates/preflight-cli/src/main.rs
// ============================================================================
// Module: Preflight CLI Entry Point
// Description: Command dispatcher for preflight configuration checks.
// Purpose: Load a snapshot, enforce the provisioning rule table for the
// requested sections, and report the outcome with a meaningful exit code.
// Dependencies: clap, preflight-core, preflight-rules, serde, serde_json
// ============================================================================

//! ## Overview
//! The `preflight` binary gates a run: `check` validates the sections the
//! run will touch against a TOML configuration snapshot and exits non-zero
//! on any failure, printing every violation in one pass; `sections` lists
//! the registered section names for discoverability.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use preflight_core::ConfigSnapshot;
use preflight_core::SectionName;
use preflight_core::ValidationReport;
use preflight_core::validate;
use preflight_rules::provisioning_registry;
use serde::Serialize;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Preflight validates configuration sections before a run starts.
#[derive(Debug, Parser)]
#[command(name = "preflight", version, about = "Sectioned configuration validation gate")]
struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Validate required sections against a configuration snapshot.
    Check(CheckArgs),
    /// List the sections known to the provisioning rule table.
    Sections,
}

/// Arguments for the `check` subcommand.
#[derive(Debug, Args)]
struct CheckArgs {
    /// Path to the TOML configuration snapshot; falls back to the
    /// `PREFLIGHT_CONFIG` environment variable, then `preflight.toml`.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Section required by the run; repeat for multiple sections.
    #[arg(long = "section", value_name = "NAME", required = true)]
    sections: Vec<String>,
    /// Output format for the validation result.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Output encodings for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable lines.
    Text,
    /// Structured JSON for tooling.
    Json,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Terminal CLI error carrying a user-facing message.
#[derive(Debug)]
struct CliError {
    /// The message printed to stderr.
    message: String,
}

impl CliError {
    /// Creates an error from a user-facing message.
    fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

// ============================================================================
// SECTION: Output Types
// ============================================================================

/// Structured result of a check invocation.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    /// `ok` or `failed`.
    status: &'a str,
    /// The sections the caller required, in evaluation order.
    sections: Vec<String>,
    /// Every validation failure found.
    failures: &'a [preflight_core::ValidationFailure],
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Process entry point: dispatches and maps errors to a failure exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Parses arguments and dispatches the selected subcommand.
fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => run_check(&args),
        Command::Sections => run_sections(),
    }
}

// ============================================================================
// SECTION: Subcommands
// ============================================================================

/// Validates the requested sections and reports every violation found.
fn run_check(args: &CheckArgs) -> Result<ExitCode, CliError> {
    let registry = provisioning_registry().map_err(|err| CliError::new(err.to_string()))?;
    let snapshot = ConfigSnapshot::load(args.config.as_deref())
        .map_err(|err| CliError::new(err.to_string()))?;
    let required = required_sections(&args.sections)?;
    let report = validate(&registry, &snapshot, &required)
        .map_err(|err| CliError::new(err.to_string()))?;
    emit_check_result(&report, &required, args.format)?;
    if report.passed() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Lists registered section names, flagging specs with no static checks.
fn run_sections() -> Result<ExitCode, CliError> {
    let registry = provisioning_registry().map_err(|err| CliError::new(err.to_string()))?;
    for (name, spec) in registry.sections() {
        let line = if spec.is_empty() {
            format!("{name} (no static checks)")
        } else {
            name.to_string()
        };
        write_stdout_line(&line).map_err(|err| CliError::new(output_error(&err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses raw section arguments into a deterministic required set.
fn required_sections(raw: &[String]) -> Result<BTreeSet<SectionName>, CliError> {
    let mut required = BTreeSet::new();
    for entry in raw {
        let name = SectionName::new(entry)
            .map_err(|err| CliError::new(format!("invalid section name '{entry}': {err}")))?;
        required.insert(name);
    }
    Ok(required)
}

/// Renders the human-readable form of a check result.
fn render_text_report(report: &ValidationReport, required: &BTreeSet<SectionName>) -> String {
    if report.passed() {
        let count = required.len();
        format!("preflight ok: {count} section(s) validated")
    } else {
        report.to_string()
    }
}

/// Writes the check result in the selected format.
fn emit_check_result(
    report: &ValidationReport,
    required: &BTreeSet<SectionName>,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            let text = render_text_report(report, required);
            write_stdout_line(&text).map_err(|err| CliError::new(output_error(&err)))?;
        }
        OutputFormat::Json => {
            let output = CheckOutput {
                status: if report.passed() { "ok" } else { "failed" },
                sections: required.iter().map(ToString::to_string).collect(),
                failures: report.failures(),
            };
            let rendered = serde_json::to_string_pretty(&output)
                .map_err(|err| CliError::new(format!("failed to encode report: {err}")))?;
            write_stdout_line(&rendered).map_err(|err| CliError::new(output_error(&err)))?;
        }
    }
    Ok(())
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Describes a failed write to an output stream.
fn output_error(error: &std::io::Error) -> String {
    format!("failed to write output: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}

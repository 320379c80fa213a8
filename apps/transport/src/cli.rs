//! # CLI Module
//!
//! Command-line driver around transport-core.
//!
//! Commands:
//! - `write`  - persist one record in every selected format
//! - `read`   - load a record back from a text or binary file
//! - `fields` - show which field reaches which format
//!
//! Every codec invocation is logged with its outcome. A failing format does
//! not stop the remaining ones.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use transport_core::{Field, Format, Transport, TransportError};

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default record, matching the demo vehicle.
pub const DEFAULT_PLATE: &str = "ABC123";
pub const DEFAULT_BRAND: &str = "Toyota";
pub const DEFAULT_YEAR: i32 = 2015;

pub const DEFAULT_TEXT_PATH: &str = "transport.txt";
pub const DEFAULT_BINARY_PATH: &str = "transport.ser";
pub const DEFAULT_JSON_PATH: &str = "transport.json";
pub const DEFAULT_YAML_PATH: &str = "transport.yaml";

// =============================================================================
// ERRORS
// =============================================================================

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("output encoding failed: {0}")]
    Output(#[from] serde_json::Error),

    #[error("{failed} of {total} formats failed to write")]
    WriteFailed { failed: usize, total: usize },
}

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "transport",
    version,
    about = "Persist a transport record as text, binary, JSON and YAML"
)]
pub struct Cli {
    /// Print command results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Log filter (e.g. `debug`, `transport=trace`). Falls back to RUST_LOG.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write the record in every selected format.
    Write(WriteArgs),

    /// Read a record back from a text or binary file.
    Read {
        /// Format of the file (`text` or `binary`).
        #[arg(long, short)]
        format: Format,

        /// File to read.
        path: PathBuf,
    },

    /// Show the field exposure table.
    Fields,
}

#[derive(Debug, Clone, Args)]
pub struct WriteArgs {
    #[arg(long, default_value = DEFAULT_PLATE)]
    pub plate: String,

    #[arg(long, default_value = DEFAULT_BRAND)]
    pub brand: String,

    #[arg(long, default_value_t = DEFAULT_YEAR, allow_negative_numbers = true)]
    pub year: i32,

    /// Directory for the default file names.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub text_out: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub binary_out: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub json_out: Option<PathBuf>,

    #[arg(long, value_name = "PATH")]
    pub yaml_out: Option<PathBuf>,

    /// Only run these formats (repeatable). Runs all when omitted.
    #[arg(long = "only", value_name = "FORMAT")]
    pub only: Vec<Format>,
}

impl WriteArgs {
    /// The record described by the arguments.
    pub fn transport(&self) -> Transport {
        Transport::new(self.plate.clone(), self.brand.clone(), self.year)
    }

    /// Output paths: explicit flags win over `--dir`, which wins over defaults.
    pub fn paths(&self) -> OutputPaths {
        let base = match &self.dir {
            Some(dir) => OutputPaths::in_dir(dir),
            None => OutputPaths::default(),
        };
        OutputPaths {
            text: self.text_out.clone().unwrap_or(base.text),
            binary: self.binary_out.clone().unwrap_or(base.binary),
            json: self.json_out.clone().unwrap_or(base.json),
            yaml: self.yaml_out.clone().unwrap_or(base.yaml),
        }
    }

    /// Formats to run, in driver order, without duplicates.
    pub fn formats(&self) -> Vec<Format> {
        if self.only.is_empty() {
            return Format::ALL.to_vec();
        }
        Format::ALL
            .into_iter()
            .filter(|format| self.only.contains(format))
            .collect()
    }
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// One target file per format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub text: PathBuf,
    pub binary: PathBuf,
    pub json: PathBuf,
    pub yaml: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            text: PathBuf::from(DEFAULT_TEXT_PATH),
            binary: PathBuf::from(DEFAULT_BINARY_PATH),
            json: PathBuf::from(DEFAULT_JSON_PATH),
            yaml: PathBuf::from(DEFAULT_YAML_PATH),
        }
    }
}

impl OutputPaths {
    /// Default file names placed under `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            text: dir.join(DEFAULT_TEXT_PATH),
            binary: dir.join(DEFAULT_BINARY_PATH),
            json: dir.join(DEFAULT_JSON_PATH),
            yaml: dir.join(DEFAULT_YAML_PATH),
        }
    }

    /// Target file for `format`.
    pub fn path(&self, format: Format) -> &Path {
        match format {
            Format::Text => &self.text,
            Format::Binary => &self.binary,
            Format::Json => &self.json,
            Format::Yaml => &self.yaml,
        }
    }
}

// =============================================================================
// REPORTS
// =============================================================================

/// Outcome of one codec write.
#[derive(Debug, Clone, Serialize)]
pub struct FormatOutcome {
    pub format: &'static str,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FormatOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcomes of a `write` run, in execution order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WriteReport {
    pub outcomes: Vec<FormatOutcome>,
}

impl WriteReport {
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_ok()).count()
    }

    pub fn all_ok(&self) -> bool {
        self.failed() == 0
    }
}

/// One row of the field exposure table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub field: &'static str,
    pub text: bool,
    pub binary: bool,
    pub json: bool,
    pub yaml: bool,
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Write `transport` in each of `formats`, logging every outcome.
///
/// Never stops early: a failing format is recorded and the next one runs.
pub fn cmd_write(transport: &Transport, paths: &OutputPaths, formats: &[Format]) -> WriteReport {
    let mut report = WriteReport::default();

    for &format in formats {
        let path = paths.path(format);
        let outcome = match transport_core::write(format, transport, path) {
            Ok(()) => {
                info!(format = %format, path = %path.display(), "record written");
                FormatOutcome {
                    format: format.name(),
                    path: path.to_path_buf(),
                    error_kind: None,
                    error: None,
                }
            }
            Err(e) => {
                error!(
                    format = %format,
                    path = %path.display(),
                    kind = e.kind().as_str(),
                    error = %e,
                    "write failed"
                );
                FormatOutcome {
                    format: format.name(),
                    path: path.to_path_buf(),
                    error_kind: Some(e.kind().as_str()),
                    error: Some(e.to_string()),
                }
            }
        };
        report.outcomes.push(outcome);
    }

    report
}

/// Read a record back from `path`.
pub fn cmd_read(format: Format, path: &Path) -> Result<Transport, CliError> {
    match transport_core::read(format, path) {
        Ok(transport) => {
            info!(format = %format, path = %path.display(), "record read");
            Ok(transport)
        }
        Err(e) => {
            error!(
                format = %format,
                path = %path.display(),
                kind = e.kind().as_str(),
                error = %e,
                "read failed"
            );
            Err(e.into())
        }
    }
}

/// Field exposure table, one row per field in declaration order.
pub fn cmd_fields() -> Vec<FieldRow> {
    Field::ALL
        .into_iter()
        .map(|field| {
            let policy = field.policy();
            FieldRow {
                field: field.key(),
                text: policy.text,
                binary: policy.binary,
                json: policy.json,
                yaml: policy.yaml,
            }
        })
        .collect()
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run a parsed command line, printing results to stdout.
pub fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Write(args) => {
            let report = cmd_write(&args.transport(), &args.paths(), &args.formats());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for outcome in &report.outcomes {
                    match &outcome.error {
                        None => {
                            println!("{:<6} ok     {}", outcome.format, outcome.path.display());
                        }
                        Some(e) => println!(
                            "{:<6} FAILED {} ({})",
                            outcome.format,
                            outcome.path.display(),
                            e
                        ),
                    }
                }
            }
            if report.all_ok() {
                Ok(())
            } else {
                Err(CliError::WriteFailed {
                    failed: report.failed(),
                    total: report.outcomes.len(),
                })
            }
        }

        Commands::Read { format, path } => {
            let transport = cmd_read(format, &path)?;
            if cli.json {
                let value = serde_json::json!({
                    "licensePlate": transport.license_plate(),
                    "brand": transport.brand(),
                    "year": transport.year(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("License Plate: {}", transport.license_plate());
                println!("Brand: {}", transport.brand());
                println!("Year: {}", transport.year());
            }
            Ok(())
        }

        Commands::Fields => {
            let rows = cmd_fields();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!(
                    "{:<14} {:<6} {:<6} {:<6} {:<6}",
                    "field", "text", "binary", "json", "yaml"
                );
                for row in rows {
                    println!(
                        "{:<14} {:<6} {:<6} {:<6} {:<6}",
                        row.field,
                        mark(row.text),
                        mark(row.binary),
                        mark(row.json),
                        mark(row.yaml)
                    );
                }
            }
            Ok(())
        }
    }
}

fn mark(included: bool) -> &'static str {
    if included { "yes" } else { "no" }
}

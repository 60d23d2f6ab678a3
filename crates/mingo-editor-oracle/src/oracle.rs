//! External oracles: diagnostics and execution.
//!
//! Both oracles are opaque executables that receive the buffer text on stdin. The diagnostics
//! oracle prints a JSON array of [`DiagnosticRecord`]s; the execution oracle runs the program and
//! its exit code and output are reported verbatim.

use crate::error::OracleError;
use crate::process::run_with_stdin;
use mingo_editor_core::DiagnosticRecord;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of one diagnostics oracle invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleOutcome {
    /// The oracle answered with a (possibly empty) list of records.
    Records(Vec<DiagnosticRecord>),
    /// The oracle is not installed. Previously published markers stay visible.
    Unavailable,
    /// The oracle ran but its output could not be used.
    Failed {
        /// Raw error text, kept for optional display.
        error: String,
    },
}

/// Something that can produce diagnostics for a source text.
///
/// Implementations are called from a background thread by
/// [`ThreadedDispatcher`](crate::ThreadedDispatcher) and may block.
pub trait DiagnosticsOracle {
    /// Compute diagnostics for `source`.
    fn diagnose(&self, source: &str) -> OracleOutcome;
}

impl<F> DiagnosticsOracle for F
where
    F: Fn(&str) -> OracleOutcome,
{
    fn diagnose(&self, source: &str) -> OracleOutcome {
        self(source)
    }
}

/// Decode the diagnostics oracle's stdout. Empty output means "no diagnostics".
pub fn parse_diagnostics_output(stdout: &str) -> Result<Vec<DiagnosticRecord>, OracleError> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Diagnostics oracle backed by an executable.
#[derive(Debug, Clone)]
pub struct ProcessDiagnosticsOracle {
    program: PathBuf,
}

impl ProcessDiagnosticsOracle {
    /// Use the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Executable path.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl DiagnosticsOracle for ProcessDiagnosticsOracle {
    fn diagnose(&self, source: &str) -> OracleOutcome {
        if !self.program.exists() {
            debug!(program = %self.program.display(), "diagnostics oracle missing");
            return OracleOutcome::Unavailable;
        }

        let output = match run_with_stdin(&self.program, source) {
            Ok(output) => output,
            Err(err) => {
                return OracleOutcome::Failed {
                    error: err.to_string(),
                };
            }
        };
        if !output.stderr.is_empty() {
            debug!(stderr = %output.stderr.trim_end(), exit_code = ?output.exit_code, "diagnostics oracle stderr");
        }

        match parse_diagnostics_output(&output.stdout) {
            Ok(records) => OracleOutcome::Records(records),
            Err(err) => OracleOutcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// Result of running a program through the execution oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Process exit code; `-1` when the runner could not be started or was killed.
    pub exit_code: i32,
    /// Program output.
    pub stdout: String,
    /// Program errors (or the reason the runner could not be started).
    pub stderr: String,
}

impl ExecutionResult {
    fn failed(stderr: String) -> Self {
        Self {
            exit_code: -1,
            stdout: String::new(),
            stderr,
        }
    }

    /// Returns `true` for a zero exit code.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Execution oracle backed by an executable.
#[derive(Debug, Clone)]
pub struct ProcessExecutionOracle {
    program: PathBuf,
}

impl ProcessExecutionOracle {
    /// Use the executable at `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `source` and collect its output. Never fails; problems are reported in `stderr`.
    pub fn run(&self, source: &str) -> ExecutionResult {
        if !self.program.exists() {
            return ExecutionResult::failed(format!(
                "Mingo runner not found at {}. Build it first.",
                self.program.display()
            ));
        }

        match run_with_stdin(&self.program, source) {
            Ok(output) => ExecutionResult {
                exit_code: output.exit_code.unwrap_or(-1),
                stdout: output.stdout,
                stderr: output.stderr,
            },
            Err(err) => ExecutionResult::failed(format!("Failed to start runner: {err}")),
        }
    }
}

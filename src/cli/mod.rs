//! CLI module for the acceptance harness
//!
//! ## Usage
//!
//! `run-tests [--reverse]` - run the standard suite, newest cases first with `--reverse`.
//!
//! ## Modules
//!
//! - `test_runner` - Suite iteration and progress reporting
//! - `cleanup` - Scratch artifact removal
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros. Any argument other than `--reverse`
//! prints the usage line and exits with status 1. Command functions return `CliResult<T>` instead of
//! calling `process::exit`; only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod cleanup;
pub mod test_runner;

use std::env;
use std::ffi::OsString;
use std::fmt;
use std::process;

use clap::{ArgAction, Parser};

use crate::config::HarnessConfig;
use crate::process::SystemInvoker;
use crate::registry::Registry;
use crate::suite;
use crate::verifier::Verifier;

use cleanup::ScratchCleanup;
use test_runner::{ConsoleReporter, Order, run_suite};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Compiler acceptance harness
#[derive(Parser, Debug)]
#[command(name = "run-tests")]
#[command(disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {
    /// Run the most recently declared cases first
    #[arg(long, action = ArgAction::Count)]
    pub reverse: u8,
}

impl Cli {
    pub fn order(&self) -> Order {
        if self.reverse > 0 { Order::Reverse } else { Order::Forward }
    }
}

/// The usage line printed for unrecognized arguments.
pub fn usage(arg0: &str) -> String {
    format!("Usage: {} [--reverse]", arg0)
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    // Non-Unicode arguments must reach clap too.
    let args: Vec<OsString> = env::args_os().collect();
    let arg0 = args
        .first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "run-tests".to_string());

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(_) => {
            eprintln!("{}", usage(&arg0));
            process::exit(ExitCode::FAILURE.0);
        }
    };

    match execute(cli, HarnessConfig::from_env()) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Build the standard suite and run it.
fn execute(cli: Cli, config: HarnessConfig) -> CliResult<ExitCode> {
    let registry = suite::standard_suite(&config).map_err(|e| CliError::failure(format!("Error: {}", e)))?;
    run_registry(&registry, cli.order(), config)
}

/// Run `registry` against the real compiler, removing the scratch paths afterwards.
pub fn run_registry(registry: &Registry, order: Order, config: HarnessConfig) -> CliResult<ExitCode> {
    // Dropped on every return path, before `run()` exits the process.
    let _cleanup = ScratchCleanup::new(&config);

    let invoker = SystemInvoker::new(config.work_dir.clone());
    let mut verifier = Verifier::new(config, invoker);
    let mut reporter = ConsoleReporter::stdout();

    match run_suite(registry, order, &mut verifier, &mut reporter) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        // The report is already on stdout.
        Err(_) => Err(CliError::new("", ExitCode::FAILURE)),
    }
}

// ============================================================================
// Tests
// ============================================================================

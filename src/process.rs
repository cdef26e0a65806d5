//! Process invocation
//!
//! Runs an external program to completion and captures its exit code and both output streams. A
//! program that cannot be started is reported like one that ran and failed, through
//! [`SPAWN_FAILED_EXIT_CODE`], so callers have a single failure path.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// Exit code reported when the program could not be spawned at all.
pub const SPAWN_FAILED_EXIT_CODE: i32 = -1;

/// Captured result of one child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }

    fn spawn_failed() -> Self {
        Self {
            exit_code: SPAWN_FAILED_EXIT_CODE,
            ..Self::default()
        }
    }
}

/// Synchronous program execution.
///
/// The verifier only talks to processes through this trait.
pub trait Invoker {
    /// Run `program` with `args`, blocking until it exits.
    fn execute(&mut self, program: &Path, args: &[String]) -> ProcessOutput;
}

/// Runs real child processes inside a working directory.
#[derive(Debug, Clone)]
pub struct SystemInvoker {
    work_dir: PathBuf,
}

impl SystemInvoker {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    /// Relative paths such as `./zig` point into the working directory; bare names go through `PATH`.
    fn resolve(&self, program: &Path) -> PathBuf {
        if program.is_relative() && program.components().count() > 1 {
            self.work_dir.join(program)
        } else {
            program.to_path_buf()
        }
    }
}

impl Invoker for SystemInvoker {
    fn execute(&mut self, program: &Path, args: &[String]) -> ProcessOutput {
        let resolved = self.resolve(program);
        let output = Command::new(&resolved)
            .args(args)
            .current_dir(&self.work_dir)
            .stdin(Stdio::null())
            .output();

        match output {
            Ok(output) => {
                let exit_code = exit_code_of(output.status);
                tracing::debug!(
                    program = %program.display(),
                    exit_code,
                    stdout_bytes = output.stdout.len(),
                    stderr_bytes = output.stderr.len(),
                    "process finished"
                );
                ProcessOutput {
                    exit_code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
            Err(e) => {
                tracing::debug!(program = %resolved.display(), error = %e, "failed to spawn process");
                ProcessOutput::spawn_failed()
            }
        }
    }
}

/// Exit code, or `128 + signal` for a child killed by a signal.
fn exit_code_of(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    SPAWN_FAILED_EXIT_CODE
}

/// The literal command line, as a user would type it to reproduce the run.
pub fn command_line(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

//! Harness configuration
//!
//! The scratch paths are fixed per run and reused by every case. They stay configuration values so
//! tests can point the harness at a temporary working directory.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the compiler executable path.
pub const COMPILER_ENV_VAR: &str = "ACCEPTANCE_COMPILER";

/// Harness configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Compiler executable, resolved against `work_dir` when relative with a separator
    pub compiler: PathBuf,
    /// Directory every source file, scratch path and child process works in
    pub work_dir: PathBuf,
    /// Shared primary source path, relative to `work_dir`
    pub scratch_source: String,
    /// Shared compiled artifact path, relative to `work_dir`
    pub scratch_exe: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            compiler: PathBuf::from("./zig"),
            work_dir: PathBuf::from("."),
            scratch_source: ".tmp_source.zig".to_string(),
            scratch_exe: "./.tmp_exe".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings with the compiler taken from `ACCEPTANCE_COMPILER` when set.
    pub fn from_env() -> Self {
        match env::var(COMPILER_ENV_VAR) {
            Ok(compiler) if !compiler.is_empty() => Self::default().with_compiler(compiler),
            _ => Self::default(),
        }
    }

    /// Set the compiler executable
    pub fn with_compiler(mut self, compiler: impl Into<PathBuf>) -> Self {
        self.compiler = compiler.into();
        self
    }

    /// Set the working directory
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Set the shared scratch source path
    pub fn with_scratch_source(mut self, path: impl Into<String>) -> Self {
        self.scratch_source = path.into();
        self
    }

    /// Set the shared scratch executable path
    pub fn with_scratch_exe(mut self, path: impl Into<String>) -> Self {
        self.scratch_exe = path.into();
        self
    }

    /// The artifact as the verifier invokes it.
    ///
    /// A bare name such as `main` becomes `./main` so the invoker resolves it inside the working
    /// directory instead of searching `PATH`.
    pub fn artifact_path(&self) -> PathBuf {
        let exe = Path::new(&self.scratch_exe);
        if exe.is_absolute() || exe.components().count() > 1 {
            exe.to_path_buf()
        } else {
            Path::new(".").join(exe)
        }
    }

    /// Location of a case-relative path inside the working directory.
    pub fn in_work_dir(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.work_dir.join(relative)
    }
}

//! Outcome verification
//!
//! Runs one case through the two-phase protocol:
//!
//! 1. **Compile** - invoke the compiler with the case's arguments. A compile-failure case must be
//!    rejected and every declared diagnostic must occur in stderr; that ends the case. A success case
//!    must be accepted.
//! 2. **Execute** - run the freshly built artifact. The exit code is checked first, then stdout is
//!    compared byte for byte against the declaration.
//!
//! Any mismatch is a [`Verdict`]. Verdicts are fatal for the whole suite, but the verifier only
//! returns them; deciding to stop and exit belongs to the caller.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::case::{Expectation, TestCase};
use crate::config::HarnessConfig;
use crate::materialize;
use crate::process::{Invoker, command_line};

/// A fatal verification failure with everything needed to reproduce it by hand.
///
/// `Display` renders the full report: literal command lines and complete stream contents.
#[derive(Debug, Error, Diagnostic)]
pub enum Verdict {
    #[error("Compile failed with return code 0 (Expected failure):\n{compiler_command}\n{stderr}")]
    #[diagnostic(
        code(acceptance::unexpected_compile_success),
        help("the compiler accepted sources it was expected to reject")
    )]
    UnexpectedCompileSuccess { compiler_command: String, stderr: String },

    #[error(
        "========= Expected this compile error: =========\n{expected}\n\
         ================================================\n{compiler_command}\n{stderr}"
    )]
    #[diagnostic(
        code(acceptance::missing_diagnostic),
        help("the compiler rejected the sources but never printed the expected text")
    )]
    MissingDiagnostic {
        expected: String,
        compiler_command: String,
        stderr: String,
    },

    #[error("Compile failed with return code {exit_code}:\n{compiler_command}\n{stderr}")]
    #[diagnostic(code(acceptance::compile_failed))]
    CompileFailed {
        exit_code: i32,
        compiler_command: String,
        stderr: String,
    },

    #[error("Program exited with return code {exit_code}:\n{compiler_command}\n{program_command}\n{stderr}")]
    #[diagnostic(code(acceptance::program_failed))]
    ProgramFailed {
        exit_code: i32,
        compiler_command: String,
        program_command: String,
        stderr: String,
    },

    #[error(
        "{compiler_command}\n{program_command}\n\
         ==== Test failed. Expected output: ====\n{expected}\n\
         ========= Actual output: ==============\n{actual}\n\
         ======================================="
    )]
    #[diagnostic(code(acceptance::output_mismatch))]
    OutputMismatch {
        compiler_command: String,
        program_command: String,
        expected: String,
        actual: String,
    },

    #[error("Unable to write source file {}: {error}", .path.display())]
    #[diagnostic(code(acceptance::materialize))]
    Materialize {
        path: PathBuf,
        #[source]
        error: io::Error,
    },
}

impl Verdict {
    /// Stable diagnostic code, for logs.
    pub fn code_str(&self) -> String {
        self.code().map(|c| c.to_string()).unwrap_or_default()
    }
}

/// Byte-level substring containment. An empty needle is always found.
pub fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Drives the compile/execute protocol through an [`Invoker`].
pub struct Verifier<I: Invoker> {
    config: HarnessConfig,
    invoker: I,
}

impl<I: Invoker> Verifier<I> {
    pub fn new(config: HarnessConfig, invoker: I) -> Self {
        Self { config, invoker }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Verify one case. `Ok(())` means it passed.
    ///
    /// Sources are written first. They are removed only when a success case passes both phases.
    pub fn verify(&mut self, case: &TestCase) -> Result<(), Verdict> {
        materialize::write_sources(&self.config.work_dir, &case.source_files)
            .map_err(|(path, error)| Verdict::Materialize { path, error })?;

        let compiler_command = command_line(&self.config.compiler, &case.compiler_args);
        let compiled = self.invoker.execute(&self.config.compiler, &case.compiler_args);
        tracing::debug!(case = %case.name, exit_code = compiled.exit_code, "compile phase finished");

        let (expected_stdout, program_args) = match &case.expectation {
            Expectation::CompileErrors(errors) => {
                if compiled.success() {
                    return Err(Verdict::UnexpectedCompileSuccess {
                        compiler_command,
                        stderr: compiled.stderr_lossy(),
                    });
                }
                if let Some(missing) = errors
                    .iter()
                    .find(|expected| !contains_bytes(&compiled.stderr, expected.as_bytes()))
                {
                    return Err(Verdict::MissingDiagnostic {
                        expected: missing.clone(),
                        compiler_command,
                        stderr: compiled.stderr_lossy(),
                    });
                }
                return Ok(());
            }
            Expectation::Output { stdout, program_args } => (stdout, program_args),
        };

        if !compiled.success() {
            return Err(Verdict::CompileFailed {
                exit_code: compiled.exit_code,
                compiler_command,
                stderr: compiled.stderr_lossy(),
            });
        }

        let program = self.config.artifact_path();
        let program_command = command_line(&program, program_args);
        let ran = self.invoker.execute(&program, program_args);
        tracing::debug!(case = %case.name, exit_code = ran.exit_code, "execute phase finished");

        if !ran.success() {
            return Err(Verdict::ProgramFailed {
                exit_code: ran.exit_code,
                compiler_command,
                program_command,
                stderr: ran.stderr_lossy(),
            });
        }

        if ran.stdout != expected_stdout.as_bytes() {
            return Err(Verdict::OutputMismatch {
                compiler_command,
                program_command,
                expected: expected_stdout.clone(),
                actual: ran.stdout_lossy(),
            });
        }

        materialize::remove_sources(&self.config.work_dir, &case.source_files);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::collections::VecDeque;
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::process::{ProcessOutput, SPAWN_FAILED_EXIT_CODE};
    use crate::registry::Registry;

    /// Replays canned outputs in order and records every invocation.
    #[derive(Default)]
    pub(crate) struct ScriptedInvoker {
        pub replies: VecDeque<ProcessOutput>,
        pub calls: Vec<(PathBuf, Vec<String>)>,
    }

    impl ScriptedInvoker {
        pub fn replying(replies: impl IntoIterator<Item = ProcessOutput>) -> Self {
            Self {
                replies: replies.into_iter().collect(),
                calls: Vec::new(),
            }
        }
    }

    impl Invoker for ScriptedInvoker {
        fn execute(&mut self, program: &Path, args: &[String]) -> ProcessOutput {
            self.calls.push((program.to_path_buf(), args.to_vec()));
            self.replies.pop_front().unwrap_or(ProcessOutput {
                exit_code: SPAWN_FAILED_EXIT_CODE,
                ..ProcessOutput::default()
            })
        }
    }

    pub(crate) fn reply(exit_code: i32, stdout: &str, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            exit_code,
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    fn setup(work_dir: &Path) -> (HarnessConfig, Registry) {
        let config = HarnessConfig::default().with_work_dir(work_dir);
        let registry = Registry::new(&config);
        (config, registry)
    }

    #[test]
    fn test_compile_failure_passes_when_all_substrings_present() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_compile_failure_case("redefinition", "fn a(){} fn a(){}", ["error: redefinition of 'a'"])
            .unwrap();

        let stderr = ".tmp_source.zig:1:10: error: redefinition of 'a'\n";
        let mut verifier = Verifier::new(config, ScriptedInvoker::replying([reply(1, "", stderr)]));
        verifier.verify(reg.get(0).unwrap()).unwrap();

        // Only the compiler ran and the source stays for inspection.
        assert_eq!(verifier.invoker().calls.len(), 1);
        assert_eq!(verifier.invoker().calls[0].0, PathBuf::from("./zig"));
        assert!(dir.path().join(".tmp_source.zig").exists());
    }

    #[test]
    fn test_compile_failure_rejects_success() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_compile_failure_case("should fail", "fn a(){}", ["error"]).unwrap();

        let mut verifier = Verifier::new(config, ScriptedInvoker::replying([reply(0, "", "")]));
        let verdict = verifier.verify(reg.get(0).unwrap()).unwrap_err();
        match verdict {
            Verdict::UnexpectedCompileSuccess { compiler_command, .. } => {
                assert_eq!(
                    compiler_command,
                    "./zig build .tmp_source.zig --output ./.tmp_exe --release --strip"
                );
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
        assert_eq!(verifier.invoker().calls.len(), 1);
    }

    #[test]
    fn test_missing_diagnostic_reports_first_missing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_compile_failure_case("two errors", "src", ["error: b", "error: c", "error: d"])
            .unwrap();

        // Order of appearance in stderr does not matter, only presence.
        let stderr = "x:4:5: error: d\nx:3:5: error: b\n";
        let mut verifier = Verifier::new(config, ScriptedInvoker::replying([reply(1, "", stderr)]));
        match verifier.verify(reg.get(0).unwrap()).unwrap_err() {
            Verdict::MissingDiagnostic { expected, stderr: actual, .. } => {
                assert_eq!(expected, "error: c");
                assert_eq!(actual, stderr);
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn test_success_case_runs_artifact_and_removes_sources() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_success_case("hello", "main", "Hello, world!\n")
            .add_source_file("libc.zig", "libc")
            .with_program_args(["one", "two"]);

        let invoker = ScriptedInvoker::replying([reply(0, "", ""), reply(0, "Hello, world!\n", "")]);
        let mut verifier = Verifier::new(config, invoker);
        verifier.verify(reg.get(0).unwrap()).unwrap();

        let calls = &verifier.invoker().calls;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].0, PathBuf::from("./.tmp_exe"));
        assert_eq!(calls[1].1, ["one", "two"]);
        assert!(!dir.path().join(".tmp_source.zig").exists());
        assert!(!dir.path().join("libc.zig").exists());
    }

    #[test]
    fn test_bare_artifact_name_runs_from_work_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_work_dir(dir.path()).with_scratch_exe("main");
        let mut reg = Registry::new(&config);
        reg.add_success_case("bare", "src", "OK\n");

        let invoker = ScriptedInvoker::replying([reply(0, "", ""), reply(0, "OK\n", "")]);
        let mut verifier = Verifier::new(config, invoker);
        verifier.verify(reg.get(0).unwrap()).unwrap();

        let calls = &verifier.invoker().calls;
        assert!(calls[0].1.windows(2).any(|w| w == ["--output", "main"]));
        assert_eq!(calls[1].0, PathBuf::from("./main"));
    }

    #[test]
    fn test_success_case_compile_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_success_case("broken", "src", "OK\n");

        let invoker = ScriptedInvoker::replying([reply(2, "", "x:1:1: error: nope\n")]);
        let mut verifier = Verifier::new(config, invoker);
        match verifier.verify(reg.get(0).unwrap()).unwrap_err() {
            Verdict::CompileFailed { exit_code, stderr, .. } => {
                assert_eq!(exit_code, 2);
                assert_eq!(stderr, "x:1:1: error: nope\n");
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
        assert_eq!(verifier.invoker().calls.len(), 1);
        assert!(dir.path().join(".tmp_source.zig").exists());
    }

    #[test]
    fn test_non_zero_exit_wins_over_matching_output() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_success_case("exit two", "src", "OK\n");

        let invoker = ScriptedInvoker::replying([reply(0, "", ""), reply(2, "OK\n", "")]);
        let mut verifier = Verifier::new(config, invoker);
        match verifier.verify(reg.get(0).unwrap()).unwrap_err() {
            Verdict::ProgramFailed {
                exit_code,
                program_command,
                ..
            } => {
                assert_eq!(exit_code, 2);
                assert_eq!(program_command, "./.tmp_exe");
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
        assert!(dir.path().join(".tmp_source.zig").exists());
    }

    #[test]
    fn test_output_must_match_byte_for_byte() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_success_case("newline", "src", "OK\n");

        let invoker = ScriptedInvoker::replying([reply(0, "", ""), reply(0, "OK", "")]);
        let mut verifier = Verifier::new(config, invoker);
        match verifier.verify(reg.get(0).unwrap()).unwrap_err() {
            Verdict::OutputMismatch { expected, actual, .. } => {
                assert_eq!(expected, "OK\n");
                assert_eq!(actual, "OK");
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
        assert!(dir.path().join(".tmp_source.zig").exists());
    }

    #[test]
    fn test_spawn_failure_is_a_compile_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_success_case("no compiler", "src", "OK\n");

        let mut verifier = Verifier::new(config, ScriptedInvoker::default());
        match verifier.verify(reg.get(0).unwrap()).unwrap_err() {
            Verdict::CompileFailed { exit_code, .. } => assert_eq!(exit_code, SPAWN_FAILED_EXIT_CODE),
            other => panic!("unexpected verdict: {other:?}"),
        }
    }

    #[test]
    fn test_materialize_failure_is_reported_before_compiling() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_success_case("bad path", "src", "OK\n")
            .add_source_file("no/such/dir.zig", "x");

        let mut verifier = Verifier::new(config, ScriptedInvoker::default());
        let verdict = verifier.verify(reg.get(0).unwrap()).unwrap_err();
        assert!(matches!(verdict, Verdict::Materialize { .. }));
        assert_eq!(verdict.code_str(), "acceptance::materialize");
        assert!(verifier.invoker().calls.is_empty());
    }

    #[test]
    fn test_materialization_overwrites_before_each_run() {
        let dir = tempfile::tempdir().unwrap();
        let (config, mut reg) = setup(dir.path());
        reg.add_compile_failure_case("rerun", "fresh source", ["error"]).unwrap();
        fs::write(dir.path().join(".tmp_source.zig"), "leftover from an earlier case").unwrap();

        let invoker = ScriptedInvoker::replying([reply(1, "", "error"), reply(1, "", "error")]);
        let mut verifier = Verifier::new(config, invoker);
        verifier.verify(reg.get(0).unwrap()).unwrap();
        verifier.verify(reg.get(0).unwrap()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join(".tmp_source.zig")).unwrap(),
            "fresh source"
        );
    }

    #[test]
    fn test_contains_bytes() {
        assert!(contains_bytes(b"a:1:1: error: x", b"error: x"));
        assert!(contains_bytes(b"anything", b""));
        assert!(!contains_bytes(b"err", b"error"));
        assert!(!contains_bytes(b"", b"e"));
    }
}

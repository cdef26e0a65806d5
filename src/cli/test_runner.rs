//! Suite runner
//!
//! Walks the registry forward or in reverse, verifies one case at a time and stops at the first
//! verdict. Reverse order runs the newest cases first, which shakes out state the compiler under test
//! keeps between invocations through the shared scratch paths.
//!
//! ## Reporter Trait
//!
//! Progress output goes through [`Reporter`] so the runner can be exercised without a terminal.
//! [`ConsoleReporter`] produces the classic `Test 3/70 goto...OK` stream.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::case::TestCase;
use crate::process::Invoker;
use crate::registry::Registry;
use crate::verifier::{Verdict, Verifier};
use crate::version::HARNESS_VERSION;

/// Iteration order over the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Forward,
    Reverse,
}

/// Trait for reporting suite progress.
///
/// `index` is always the case's 1-based position in the registry, also in reverse runs.
pub trait Reporter {
    /// Called once before the first case
    fn on_suite_start(&mut self, _total: usize, _order: Order) {}

    /// Called before a case is verified
    fn on_case_start(&mut self, index: usize, total: usize, case: &TestCase);

    /// Called when a case passes
    fn on_case_passed(&mut self, index: usize, case: &TestCase);

    /// Called with the verdict that stops the suite
    fn on_case_failed(&mut self, index: usize, case: &TestCase, verdict: &Verdict);

    /// Called when every case has passed
    fn on_suite_complete(&mut self, summary: &RunSummary);
}

/// Summary of a fully passing run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub duration: Duration,
}

/// The case that stopped the suite, and why.
#[derive(Debug)]
pub struct SuiteFailure {
    /// 1-based registry position
    pub index: usize,
    pub case_name: String,
    /// Cases that passed before this one
    pub passed: usize,
    pub verdict: Verdict,
}

/// Plain-text reporter over any writer (stdout by default).
pub struct ConsoleReporter<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

// Write errors on the progress stream are ignored; they must not change a verdict.
impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_case_start(&mut self, index: usize, total: usize, case: &TestCase) {
        let _ = write!(self.out, "Test {}/{} {}...", index, total, case.name);
        let _ = self.out.flush();
    }

    fn on_case_passed(&mut self, _index: usize, _case: &TestCase) {
        let _ = writeln!(self.out, "OK");
    }

    fn on_case_failed(&mut self, _index: usize, _case: &TestCase, verdict: &Verdict) {
        let _ = writeln!(self.out, "\n{}", verdict);
        let _ = self.out.flush();
    }

    fn on_suite_complete(&mut self, summary: &RunSummary) {
        let _ = writeln!(self.out, "{} tests passed.", summary.total);
        let _ = self.out.flush();
    }
}

/// Run every case in `order`, stopping at the first verdict.
pub fn run_suite<I: Invoker, R: Reporter>(
    registry: &Registry,
    order: Order,
    verifier: &mut Verifier<I>,
    reporter: &mut R,
) -> Result<RunSummary, SuiteFailure> {
    let start = Instant::now();
    let total = registry.len();
    tracing::info!(version = HARNESS_VERSION, total, ?order, "starting acceptance suite");
    reporter.on_suite_start(total, order);

    let positions: Vec<usize> = match order {
        Order::Forward => (0..total).collect(),
        Order::Reverse => (0..total).rev().collect(),
    };

    let mut passed = 0;
    for position in positions {
        let case = &registry.cases()[position];
        let index = position + 1;
        reporter.on_case_start(index, total, case);

        match verifier.verify(case) {
            Ok(()) => {
                passed += 1;
                reporter.on_case_passed(index, case);
            }
            Err(verdict) => {
                tracing::error!(case = %case.name, index, code = %verdict.code_str(), "case failed");
                reporter.on_case_failed(index, case, &verdict);
                return Err(SuiteFailure {
                    index,
                    case_name: case.name.clone(),
                    passed,
                    verdict,
                });
            }
        }
    }

    let summary = RunSummary {
        total,
        passed,
        duration: start.elapsed(),
    };
    tracing::info!(passed, elapsed_ms = elapsed_millis(summary.duration), "acceptance suite passed");
    reporter.on_suite_complete(&summary);
    Ok(summary)
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::config::HarnessConfig;
    use crate::verifier::tests::{ScriptedInvoker, reply};

    /// Records events as compact strings.
    #[derive(Default)]
    struct RecordingReporter {
        events: Vec<String>,
    }

    impl Reporter for RecordingReporter {
        fn on_suite_start(&mut self, total: usize, order: Order) {
            self.events.push(format!("start {total} {order:?}"));
        }
        fn on_case_start(&mut self, index: usize, total: usize, case: &TestCase) {
            self.events.push(format!("case {index}/{total} {}", case.name));
        }
        fn on_case_passed(&mut self, index: usize, _case: &TestCase) {
            self.events.push(format!("ok {index}"));
        }
        fn on_case_failed(&mut self, index: usize, _case: &TestCase, verdict: &Verdict) {
            self.events.push(format!("failed {index} {}", verdict.code_str()));
        }
        fn on_suite_complete(&mut self, summary: &RunSummary) {
            self.events.push(format!("done {}", summary.total));
        }
    }

    fn three_case_registry(config: &HarnessConfig) -> Registry {
        let mut reg = Registry::new(config);
        reg.add_compile_failure_case("first", "a", ["error: a"]).unwrap();
        reg.add_compile_failure_case("second", "b", ["error: b"]).unwrap();
        reg.add_compile_failure_case("third", "c", ["error: c"]).unwrap();
        reg
    }

    fn rejecting_everything() -> ScriptedInvoker {
        ScriptedInvoker::replying((0..3).map(|_| reply(1, "", "error: a error: b error: c")))
    }

    #[test]
    fn test_forward_run_reports_every_case() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_work_dir(dir.path());
        let reg = three_case_registry(&config);
        let mut verifier = Verifier::new(config, rejecting_everything());
        let mut reporter = RecordingReporter::default();

        let summary = run_suite(&reg, Order::Forward, &mut verifier, &mut reporter).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 3);
        assert_eq!(
            reporter.events,
            [
                "start 3 Forward",
                "case 1/3 first",
                "ok 1",
                "case 2/3 second",
                "ok 2",
                "case 3/3 third",
                "ok 3",
                "done 3"
            ]
        );
    }

    #[test]
    fn test_reverse_run_keeps_registry_indices() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_work_dir(dir.path());
        let reg = three_case_registry(&config);
        let mut verifier = Verifier::new(config, rejecting_everything());
        let mut reporter = RecordingReporter::default();

        run_suite(&reg, Order::Reverse, &mut verifier, &mut reporter).unwrap();
        let starts: Vec<_> = reporter.events.iter().filter(|e| e.starts_with("case")).collect();
        assert_eq!(starts, ["case 3/3 third", "case 2/3 second", "case 1/3 first"]);
    }

    #[test]
    fn test_first_verdict_stops_the_suite() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_work_dir(dir.path());
        let reg = three_case_registry(&config);
        // The second compile "succeeds", which a compile-failure case must not do.
        let invoker = ScriptedInvoker::replying([reply(1, "", "error: a"), reply(0, "", ""), reply(1, "", "")]);
        let mut verifier = Verifier::new(config, invoker);
        let mut reporter = RecordingReporter::default();

        let failure = run_suite(&reg, Order::Forward, &mut verifier, &mut reporter).unwrap_err();
        assert_eq!(failure.index, 2);
        assert_eq!(failure.case_name, "second");
        assert_eq!(failure.passed, 1);
        assert!(matches!(failure.verdict, Verdict::UnexpectedCompileSuccess { .. }));
        assert_eq!(verifier.invoker().calls.len(), 2);
        assert_eq!(
            reporter.events.last().unwrap(),
            "failed 2 acceptance::unexpected_compile_success"
        );
        assert!(!reporter.events.iter().any(|e| e.starts_with("done")));
    }

    #[test]
    fn test_console_reporter_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_work_dir(dir.path());
        let mut reg = Registry::new(&config);
        reg.add_success_case("hello", "src", "Hello, world!\n");
        reg.add_compile_failure_case("redefinition", "src", ["error: redefinition of 'a'"])
            .unwrap();

        let invoker = ScriptedInvoker::replying([
            reply(0, "", ""),
            reply(0, "Hello, world!\n", ""),
            reply(1, "", ".tmp_source.zig:3:1: error: redefinition of 'a'\n"),
        ]);
        let mut verifier = Verifier::new(config, invoker);
        let mut reporter = ConsoleReporter::new(Vec::new());

        run_suite(&reg, Order::Forward, &mut verifier, &mut reporter).unwrap();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            text,
            "Test 1/2 hello...OK\nTest 2/2 redefinition...OK\n2 tests passed.\n"
        );
        assert_eq!(verifier.invoker().calls[1].0, Path::new("./.tmp_exe"));
    }

    #[test]
    fn test_console_reporter_prints_verdict_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_work_dir(dir.path());
        let mut reg = Registry::new(&config);
        reg.add_success_case("exit code", "src", "OK\n");

        let invoker = ScriptedInvoker::replying([reply(0, "", ""), reply(2, "OK\n", "boom")]);
        let mut verifier = Verifier::new(config, invoker);
        let mut reporter = ConsoleReporter::new(Vec::new());

        run_suite(&reg, Order::Forward, &mut verifier, &mut reporter).unwrap_err();
        let text = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(text.starts_with("Test 1/1 exit code...\nProgram exited with return code 2:\n"));
        assert!(text.contains("./.tmp_exe\nboom"));
    }

    #[test]
    fn test_empty_registry_passes() {
        let dir = tempfile::tempdir().unwrap();
        let config = HarnessConfig::default().with_work_dir(dir.path());
        let reg = Registry::new(&config);
        let mut verifier = Verifier::new(config, ScriptedInvoker::default());
        let mut reporter = ConsoleReporter::new(Vec::new());

        let summary = run_suite(&reg, Order::Reverse, &mut verifier, &mut reporter).unwrap();
        assert_eq!(summary.total, 0);
        assert_eq!(String::from_utf8(reporter.into_inner()).unwrap(), "0 tests passed.\n");
    }

    #[test]
    fn test_elapsed_millis_saturates() {
        assert_eq!(elapsed_millis(Duration::from_millis(1500)), 1500);
        assert_eq!(elapsed_millis(Duration::MAX), u64::MAX);
    }
}

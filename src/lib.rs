#![forbid(unsafe_code)]
//! Compiler acceptance harness
//!
//! Declares fixed source programs together with their expected outcome, drives an external compiler
//! and the binaries it produces, and verifies the actual behavior against the declaration.
//!
//! A case is either a *success case* (compiles, runs, prints exactly the declared stdout) or a
//! *compile-failure case* (rejected by the compiler with each declared diagnostic substring present
//! on stderr). The harness does not understand the compiled language: compiler and program output are
//! opaque byte streams plus exit codes.
//!
//! ## Layout
//!
//! - [`case`] / [`registry`] - the declarative case model and its builders
//! - [`materialize`] - writes case sources into the working directory
//! - [`process`] - blocking child-process execution with full stream capture
//! - [`verifier`] - the two-phase compile/execute protocol and its verdicts
//! - [`cli`] - the runner, reporting, scratch cleanup and the `run-tests` entry point
//! - [`suite`] - the standard acceptance suite
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Every module except
//!   `version` enforces `#![deny(clippy::unwrap_used)]` and `#![deny(clippy::expect_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Single runner per working directory
//!
//! Every case shares the same scratch source and scratch executable paths. Runs are strictly
//! sequential, and two runners must never execute against the same working directory at once.

pub mod case;
pub mod cli;
pub mod config;
pub mod materialize;
pub mod process;
pub mod registry;
pub mod suite;
pub mod verifier;
pub mod version;

pub use case::{Expectation, SourceFile, TestCase};
pub use cli::test_runner::{ConsoleReporter, Order, Reporter, RunSummary, SuiteFailure, run_suite};
pub use config::HarnessConfig;
pub use process::{Invoker, ProcessOutput, SystemInvoker};
pub use registry::{Registry, RegistryError};
pub use verifier::{Verdict, Verifier};

//! Ordered case registry and the two case builders
//!
//! The suite-definition routine builds a [`Registry`] and hands it to the runner by reference. Cases
//! keep their insertion order, which only affects reporting and reverse runs.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use thiserror::Error;

use crate::case::{Expectation, SourceFile, TestCase};
use crate::config::HarnessConfig;

/// Errors raised while declaring cases
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("compile-failure case '{0}' declares no expected errors")]
    NoExpectedErrors(String),
}

/// Ordered collection of declared cases.
#[derive(Debug, Clone)]
pub struct Registry {
    scratch_source: String,
    scratch_exe: String,
    cases: Vec<TestCase>,
}

impl Registry {
    /// Empty registry whose default argument templates target the configured scratch paths.
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            scratch_source: config.scratch_source.clone(),
            scratch_exe: config.scratch_exe.clone(),
            cases: Vec::new(),
        }
    }

    /// Declare a case that must compile, run and print exactly `expected_stdout`.
    ///
    /// The primary source is written to the scratch source path. The returned handle can attach
    /// further source files or program arguments.
    pub fn add_success_case(
        &mut self,
        name: impl Into<String>,
        primary_source: impl Into<String>,
        expected_stdout: impl Into<String>,
    ) -> &mut TestCase {
        let compiler_args = vec![
            "build".to_string(),
            self.scratch_source.clone(),
            "--export".to_string(),
            "exe".to_string(),
            "--name".to_string(),
            "test".to_string(),
            "--output".to_string(),
            self.scratch_exe.clone(),
            "--release".to_string(),
            "--strip".to_string(),
            "--color".to_string(),
            "on".to_string(),
        ];
        self.push(TestCase {
            name: name.into(),
            source_files: vec![SourceFile::new(self.scratch_source.clone(), primary_source)],
            compiler_args,
            expectation: Expectation::Output {
                stdout: expected_stdout.into(),
                program_args: Vec::new(),
            },
        })
    }

    /// Declare a case the compiler must reject with every one of `expected_errors` on stderr.
    pub fn add_compile_failure_case<I, S>(
        &mut self,
        name: impl Into<String>,
        primary_source: impl Into<String>,
        expected_errors: I,
    ) -> Result<&mut TestCase, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let errors: Vec<String> = expected_errors.into_iter().map(Into::into).collect();
        if errors.is_empty() {
            return Err(RegistryError::NoExpectedErrors(name));
        }

        let compiler_args = vec![
            "build".to_string(),
            self.scratch_source.clone(),
            "--output".to_string(),
            self.scratch_exe.clone(),
            "--release".to_string(),
            "--strip".to_string(),
        ];
        Ok(self.push(TestCase {
            name,
            source_files: vec![SourceFile::new(self.scratch_source.clone(), primary_source)],
            compiler_args,
            expectation: Expectation::CompileErrors(errors),
        }))
    }

    fn push(&mut self, case: TestCase) -> &mut TestCase {
        self.cases.push(case);
        let last = self.cases.len() - 1;
        &mut self.cases[last]
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TestCase> {
        self.cases.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.cases.iter()
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a TestCase;
    type IntoIter = std::slice::Iter<'a, TestCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

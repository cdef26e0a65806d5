//! Declarative test-case model
//!
//! A [`TestCase`] pairs source input with the outcome the compiler is expected to produce. The case
//! kind lives in [`Expectation`]: either the program builds, runs and prints an exact stdout, or the
//! compiler rejects the sources with a set of diagnostics.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// A source file written into the working directory before the compiler runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the working directory
    pub relative_path: String,
    /// File contents, written verbatim
    pub content: String,
}

impl SourceFile {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// What a case expects from the compiler and, for success cases, from the produced program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Compile cleanly, then run the artifact and require an exact stdout match.
    Output {
        /// Expected stdout, byte for byte (including the trailing newline)
        stdout: String,
        /// Arguments passed to the produced artifact
        program_args: Vec<String>,
    },
    /// Compiler must reject the sources; each entry must occur somewhere in its stderr.
    CompileErrors(Vec<String>),
}

/// A declared acceptance case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Display name (not required to be unique)
    pub name: String,
    /// Sources to materialize, primary source first
    pub source_files: Vec<SourceFile>,
    /// Arguments for the compiler invocation
    pub compiler_args: Vec<String>,
    pub expectation: Expectation,
}

impl TestCase {
    /// Attach an auxiliary source file.
    pub fn add_source_file(&mut self, relative_path: impl Into<String>, content: impl Into<String>) -> &mut Self {
        self.source_files.push(SourceFile::new(relative_path, content));
        self
    }

    /// Set the arguments passed to the produced program.
    ///
    /// Compile-failure cases never run a program, so the arguments are dropped for them.
    pub fn with_program_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Expectation::Output { program_args, .. } = &mut self.expectation {
            *program_args = args.into_iter().map(Into::into).collect();
        }
        self
    }

    /// The entry source, the one named on the compiler command line.
    pub fn primary_source(&self) -> Option<&SourceFile> {
        self.source_files.first()
    }

    pub fn is_compile_failure(&self) -> bool {
        matches!(self.expectation, Expectation::CompileErrors(_))
    }
}

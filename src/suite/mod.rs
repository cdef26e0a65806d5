//! The standard acceptance suite
//!
//! Compiling cases come first, compile-error cases after them. The sources are fixed input data; the
//! harness never looks inside them.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod compile_errors;
mod compiling;

use crate::config::HarnessConfig;
use crate::registry::{Registry, RegistryError};

/// Declare every standard case against the configured scratch paths.
pub fn standard_suite(config: &HarnessConfig) -> Result<Registry, RegistryError> {
    let mut reg = Registry::new(config);
    compiling::add_compiling_cases(&mut reg);
    compile_errors::add_compile_failure_cases(&mut reg, &config.scratch_source)?;
    Ok(reg)
}

/// `<path>:<line>:<col>: error: <message>`, the compiler's diagnostic format.
fn error_at(path: &str, location: &str, message: &str) -> String {
    format!("{}:{}: error: {}", path, location, message)
}

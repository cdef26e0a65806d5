//! Scratch artifact cleanup
//!
//! The driver holds a [`ScratchCleanup`] for the whole run. Dropping it removes the shared scratch
//! source and executable, whether the suite completed or stopped at a verdict.

use std::path::PathBuf;

use crate::config::HarnessConfig;
use crate::materialize::remove_if_present;

/// Removes the shared scratch paths when dropped. Missing files are not an error.
#[derive(Debug)]
pub struct ScratchCleanup {
    paths: Vec<PathBuf>,
}

impl ScratchCleanup {
    pub fn new(config: &HarnessConfig) -> Self {
        Self {
            paths: vec![
                config.in_work_dir(&config.scratch_source),
                config.in_work_dir(&config.scratch_exe),
            ],
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl Drop for ScratchCleanup {
    fn drop(&mut self) {
        for path in &self.paths {
            remove_if_present(path);
        }
    }
}

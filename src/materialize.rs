//! Source materialization
//!
//! Writes a case's declared sources into the working directory right before the compiler runs, and
//! removes them once a success case has fully passed.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::case::SourceFile;

/// Write every source verbatim under `work_dir`, overwriting existing files.
///
/// No directories are created; a path whose parent does not exist fails with the I/O error.
pub fn write_sources(work_dir: &Path, sources: &[SourceFile]) -> Result<(), (PathBuf, io::Error)> {
    for source in sources {
        let path = work_dir.join(&source.relative_path);
        fs::write(&path, source.content.as_bytes()).map_err(|e| (path.clone(), e))?;
        tracing::debug!(path = %path.display(), bytes = source.content.len(), "materialized source");
    }
    Ok(())
}

/// Remove the sources of a passed case. Files already gone are ignored.
pub fn remove_sources(work_dir: &Path, sources: &[SourceFile]) {
    for source in sources {
        remove_if_present(&work_dir.join(&source.relative_path));
    }
}

/// Best-effort removal; only failures other than "not found" are logged.
pub fn remove_if_present(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "removed"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not remove file"),
    }
}

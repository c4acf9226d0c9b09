//! Clean/create stage.
//!
//! Stale output directories are removed before packaging and recreated
//! empty. A directory that cannot be removed (typically because a file in it
//! is still open) aborts the run, since packaging on top of a half-cleaned
//! tree would mix old and new output.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use super::PackageError;

/// Result of cleaning a single directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
  Removed,
  Absent,
}

/// Remove a directory tree. A directory that does not exist is not an error.
pub fn clean_dir(path: &Path) -> Result<CleanOutcome, PackageError> {
  info!(path = %path.display(), "cleaning last build");

  match fs::remove_dir_all(path) {
    Ok(()) => Ok(CleanOutcome::Removed),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      info!(path = %path.display(), "no previous build found, skipping clean");
      Ok(CleanOutcome::Absent)
    }
    Err(e) => {
      error!(path = %path.display(), error = %e, "could not clean build, files are likely in use");
      Err(PackageError::Clean {
        path: path.to_path_buf(),
        source: e,
      })
    }
  }
}

/// Remove every directory in order. Returns how many existed and were removed.
pub fn clean(directories: &[PathBuf]) -> Result<usize, PackageError> {
  let mut removed = 0;
  for dir in directories {
    if clean_dir(dir)? == CleanOutcome::Removed {
      removed += 1;
    }
  }
  Ok(removed)
}

/// Create a directory and its parents.
///
/// Returns `false` when the path already existed, which means the clean step
/// did not cover it.
pub fn create_dir(path: &Path) -> Result<bool, PackageError> {
  if path.exists() {
    warn!(path = %path.display(), "build folder was not cleaned");
    return Ok(false);
  }

  info!(path = %path.display(), "creating directory");
  fs::create_dir_all(path).map_err(|e| PackageError::CreateDir {
    path: path.to_path_buf(),
    source: e,
  })?;
  Ok(true)
}

/// Create every directory in order. Returns how many were newly created.
pub fn create_dirs(directories: &[PathBuf]) -> Result<usize, PackageError> {
  let mut created = 0;
  for dir in directories {
    if create_dir(dir)? {
      created += 1;
    }
  }
  Ok(created)
}

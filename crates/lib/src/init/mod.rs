//! Scaffold a starter manifest.
//!
//! `shipkit init` writes a `shipkit.toml` with the three stock profiles
//! (`application`, `delta`, `dlls`) and a tracker section, ready to be
//! edited for the project at hand.

mod templates;

use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::consts::MANIFEST_FILENAME;

pub use templates::MANIFEST_TEMPLATE;

#[derive(Debug, Error)]
pub enum InitError {
  #[error("file already exists: {}", path.display())]
  PathExists { path: PathBuf },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir { path: PathBuf, source: std::io::Error },

  #[error("failed to write file {}: {source}", path.display())]
  WriteFile { path: PathBuf, source: std::io::Error },

  #[error("failed to canonicalize path {}: {source}", path.display())]
  Canonicalize { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, serde::Serialize)]
pub struct InitResult {
  /// Directory holding the manifest (canonicalized).
  pub dir: PathBuf,
  pub manifest: PathBuf,
}

/// Write a starter manifest into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Fails with [`InitError::PathExists`] when a manifest is already present.
pub fn init(dir: &std::path::Path) -> Result<InitResult, InitError> {
  fs::create_dir_all(dir).map_err(|e| InitError::CreateDir {
    path: dir.to_path_buf(),
    source: e,
  })?;

  let dir = dunce::canonicalize(dir).map_err(|e| InitError::Canonicalize {
    path: dir.to_path_buf(),
    source: e,
  })?;

  let manifest = dir.join(MANIFEST_FILENAME);
  if manifest.exists() {
    return Err(InitError::PathExists { path: manifest });
  }

  fs::write(&manifest, MANIFEST_TEMPLATE).map_err(|e| InitError::WriteFile {
    path: manifest.clone(),
    source: e,
  })?;

  info!(path = %manifest.display(), "wrote starter manifest");

  Ok(InitResult { dir, manifest })
}

//! Resource copy strategies.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use super::PackageError;
use super::clean::clean_dir;
use crate::resource::{Resource, ResourceKind};

/// What happened to one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CopyOutcome {
  /// The resource was copied; `files` counts regular files written.
  Copied { files: usize },
  /// An optional resource whose source does not exist.
  SkippedOptional,
  /// A required folder whose source does not exist. The package lacks it.
  Missing,
}

/// Copy one resource according to its kind.
pub fn copy_resource(resource: &Resource) -> Result<CopyOutcome, PackageError> {
  info!(
    "Copying resource: {} [{} ==> {}]",
    resource.name,
    resource.source.display(),
    resource.target.display()
  );

  match resource.kind {
    ResourceKind::Folder => copy_folder(resource),
    ResourceKind::File => copy_file(resource),
    ResourceKind::DllSet => copy_libraries(resource),
  }
}

fn copy_folder(resource: &Resource) -> Result<CopyOutcome, PackageError> {
  if !resource.source.exists() {
    if resource.optional {
      info!(source = %resource.source.display(), "optional resource not found");
      return Ok(CopyOutcome::SkippedOptional);
    }
    warn!(source = %resource.source.display(), "could not find resource");
    return Ok(CopyOutcome::Missing);
  }

  // Optional resources may be refreshed in place by rerunning the same step.
  if resource.optional {
    clean_dir(&resource.target)?;
  }

  let files = copy_tree(&resource.source, &resource.target).map_err(|e| {
    error!(
      source = %resource.source.display(),
      target = %resource.target.display(),
      error = %e,
      "could not copy resource, files likely in use"
    );
    PackageError::CopyFolder {
      name: resource.name.clone(),
      from: resource.source.clone(),
      to: resource.target.clone(),
      source: e,
    }
  })?;

  Ok(CopyOutcome::Copied { files })
}

/// Recursively copy `source` into a new directory `target`.
///
/// `target` must not exist yet; missing parents are created.
pub fn copy_tree(source: &Path, target: &Path) -> io::Result<usize> {
  if !source.is_dir() {
    return Err(io::Error::new(
      io::ErrorKind::InvalidInput,
      format!("source {} is not a directory", source.display()),
    ));
  }
  if target.exists() {
    return Err(io::Error::new(
      io::ErrorKind::AlreadyExists,
      format!("destination {} already exists", target.display()),
    ));
  }
  fs::create_dir_all(target)?;

  let mut files = 0;
  for entry in WalkDir::new(source).min_depth(1).follow_links(true).sort_by_file_name() {
    let entry = entry?;
    let relative = entry.path().strip_prefix(source).map_err(io::Error::other)?;
    let dest = target.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&dest)?;
    } else {
      debug!(from = %entry.path().display(), to = %dest.display(), "copying file");
      fs::copy(entry.path(), &dest)?;
      files += 1;
    }
  }

  Ok(files)
}

fn copy_file(resource: &Resource) -> Result<CopyOutcome, PackageError> {
  let file_error = |e: io::Error| PackageError::CopyFile {
    name: resource.name.clone(),
    from: resource.source.clone(),
    to: resource.target.clone(),
    source: e,
  };

  let dest = if resource.target.is_dir() {
    let file_name = resource.source.file_name().ok_or_else(|| {
      file_error(io::Error::new(
        io::ErrorKind::InvalidInput,
        "source path has no file name",
      ))
    })?;
    resource.target.join(file_name)
  } else {
    resource.target.clone()
  };

  fs::copy(&resource.source, &dest).map_err(file_error)?;
  Ok(CopyOutcome::Copied { files: 1 })
}

/// Copy every file under the source whose name ends with the resource's
/// extension into the target directory, dropping the subdirectory structure.
///
/// A target nested inside the source is left out of the walk. A target equal
/// to the source is refused.
fn copy_libraries(resource: &Resource) -> Result<CopyOutcome, PackageError> {
  info!(extension = %resource.extension, "copying required runtime libraries");

  let lib_error = |path: &Path, e: io::Error| PackageError::CopyLibraries {
    name: resource.name.clone(),
    path: path.to_path_buf(),
    source: e,
  };

  if !resource.source.is_dir() {
    warn!(source = %resource.source.display(), "library directory not found, nothing copied");
    return Ok(CopyOutcome::Copied { files: 0 });
  }

  fs::create_dir_all(&resource.target).map_err(|e| lib_error(&resource.target, e))?;

  let source = dunce::canonicalize(&resource.source).map_err(|e| lib_error(&resource.source, e))?;
  let target = dunce::canonicalize(&resource.target).map_err(|e| lib_error(&resource.target, e))?;
  if source == target {
    error!(path = %source.display(), "library source and target are the same directory");
    return Err(lib_error(
      &resource.target,
      io::Error::new(io::ErrorKind::InvalidInput, "source and target are the same directory"),
    ));
  }

  let walker = WalkDir::new(&source)
    .follow_links(true)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| !entry.path().starts_with(&target));

  let mut files = 0;
  for entry in walker {
    let entry = entry.map_err(|e| lib_error(&source, e.into()))?;
    if !entry.file_type().is_file() {
      continue;
    }

    let name = entry.file_name();
    if !name.to_string_lossy().ends_with(resource.extension.as_str()) {
      continue;
    }

    let dest = target.join(name);
    debug!(from = %entry.path().display(), to = %dest.display(), "copying library");
    fs::copy(entry.path(), &dest).map_err(|e| lib_error(entry.path(), e))?;
    files += 1;
  }

  Ok(CopyOutcome::Copied { files })
}

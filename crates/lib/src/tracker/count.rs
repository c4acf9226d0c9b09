//! Source line counting.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info};
use walkdir::WalkDir;

use super::TrackerError;
use crate::util::lines::count_file_lines;

/// Line totals per tracked extension.
///
/// Extensions appear in the order they were first matched during the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineCount {
  pub by_extension: IndexMap<String, u64>,
  pub total: u64,
  pub files: usize,
}

impl LineCount {
  fn add(&mut self, extension: &str, lines: u64) {
    *self.by_extension.entry(extension.to_string()).or_insert(0) += lines;
    self.total += lines;
  }
}

/// Rules for which files are counted.
#[derive(Debug, Clone, Copy)]
pub struct CountRules<'a> {
  pub extensions: &'a [String],
  pub ignore: &'a [String],
}

impl CountRules<'_> {
  /// First configured extension the file name ends with.
  fn matching_extension(&self, file_name: &str) -> Option<&str> {
    self
      .extensions
      .iter()
      .find(|ext| file_name.ends_with(ext.as_str()))
      .map(String::as_str)
  }

  fn is_ignored(&self, file_name: &str) -> bool {
    self.ignore.iter().any(|name| name == file_name)
  }
}

/// Count lines in every tracked file under `directories`.
///
/// Directories that do not exist contribute nothing. An ignored file still
/// registers its extension in the breakdown, with zero lines.
pub fn count_directories(directories: &[PathBuf], rules: CountRules<'_>) -> Result<LineCount, TrackerError> {
  let mut count = LineCount::default();

  for dir in directories {
    if !dir.is_dir() {
      debug!(path = %dir.display(), "source directory not found, skipping");
      continue;
    }
    scan_directory(dir, rules, &mut count)?;
  }

  for (extension, lines) in &count.by_extension {
    info!("lines in {extension} files: {lines}");
  }

  Ok(count)
}

fn scan_directory(dir: &Path, rules: CountRules<'_>, count: &mut LineCount) -> Result<(), TrackerError> {
  for entry in WalkDir::new(dir).sort_by_file_name() {
    let entry = entry.map_err(|e| TrackerError::Walk {
      path: dir.to_path_buf(),
      source: e,
    })?;
    if !entry.file_type().is_file() {
      continue;
    }

    let file_name = entry.file_name().to_string_lossy();
    let Some(extension) = rules.matching_extension(&file_name) else {
      continue;
    };

    if rules.is_ignored(&file_name) {
      debug!(path = %entry.path().display(), "ignoring file");
      count.add(extension, 0);
      continue;
    }

    let lines = count_file_lines(entry.path()).map_err(|e| TrackerError::Read {
      path: entry.path().to_path_buf(),
      source: e,
    })?;
    count.add(extension, lines);
    count.files += 1;
  }

  Ok(())
}

//! Test utilities for shipkit-lib.
//!
//! Helpers for building small directory trees on disk and reading them back
//! in a platform-independent form.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

/// Write `(relative_path, content)` pairs under `root`, creating parents.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
  for (relative, content) in files {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
  }
}

/// All files below `root` as sorted, `/`-separated relative paths.
pub fn list_files(root: &Path) -> Vec<String> {
  let mut files: Vec<String> = WalkDir::new(root)
    .min_depth(1)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_file())
    .map(|e| relative_name(root, e.path()))
    .collect();
  files.sort();
  files
}

/// All directories below `root` as sorted, `/`-separated relative paths.
pub fn list_dirs(root: &Path) -> Vec<String> {
  let mut dirs: Vec<String> = WalkDir::new(root)
    .min_depth(1)
    .into_iter()
    .filter_map(|e| e.ok())
    .filter(|e| e.file_type().is_dir())
    .map(|e| relative_name(root, e.path()))
    .collect();
  dirs.sort();
  dirs
}

fn relative_name(root: &Path, path: &Path) -> String {
  path
    .strip_prefix(root)
    .unwrap()
    .components()
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect::<Vec<_>>()
    .join("/")
}

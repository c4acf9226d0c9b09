//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Manifest used by most tests. Lives in `scripts/`, rooted one level up.
pub const PROJECT_MANIFEST: &str = r#"
variables = [
  { name = "root", value = "{manifest_dir}/.." },
  { name = "output", value = "{root}/workspace/build" },
]

[profiles.application]
title = "Packaging {project_name}"
arguments = ["architecture", "project_name"]
variables = [{ name = "dll_dir", value = "{root}/dependencies/runtime/{architecture}" }]
clean = ["{output}"]
create = ["{output}"]
resources = [
  { name = "assets", source = "{root}/assets", target = "{output}/assets" },
  { name = "fonts", source = "{root}/delta/fonts", target = "{output}/delta/fonts", optional = true },
  { name = "runtime dependencies", source = "{dll_dir}", target = "{output}", kind = "dlls" },
  { name = "binaries", source = "{root}/project/{project_name}.exe", target = "{output}", kind = "file" },
]

[profiles.shaders]
resources = [
  { name = "shaders", source = "{root}/shaders", target = "{output}/shaders" },
]

[tracker]
root = "{root}"
tracking_dir = "{root}/workspace/tracking"
directories = ["src", "include"]
extensions = [".h", ".cpp"]
ignore = ["sqlite3.h"]
"#;

/// Isolated test environment.
///
/// Each test gets its own project directory with the manifest in `scripts/`.
pub struct TestEnv {
  pub temp: TempDir,
  pub manifest_path: PathBuf,
}

impl TestEnv {
  /// Create a project with the given manifest content.
  pub fn with_manifest(content: &str) -> Self {
    let env = Self::empty();
    env.write_file("scripts/shipkit.toml", content);
    env
  }

  /// Create a project using [`PROJECT_MANIFEST`].
  pub fn project() -> Self {
    Self::with_manifest(PROJECT_MANIFEST)
  }

  /// Create an empty project without a manifest.
  pub fn empty() -> Self {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("scripts").join("shipkit.toml");
    Self { temp, manifest_path }
  }

  pub fn root(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Read a file relative to the project root.
  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.temp.path().join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  /// Get a pre-configured Command for the shipkit binary.
  ///
  /// Runs in the project root with:
  /// - `SHIPKIT_MANIFEST`: the project manifest
  /// - `NO_COLOR`: plain output for matching
  /// - `RUST_LOG` removed so the default filter applies
  pub fn shipkit_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("shipkit");
    cmd.current_dir(self.temp.path());
    cmd.env("SHIPKIT_MANIFEST", &self.manifest_path);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}

//! Resource descriptors.
//!
//! A resource names one filesystem object to copy into the package: a whole
//! folder, a single file, or every library file found under a directory. The
//! manifest declares resources with templated endpoints ([`ResourceSpec`]);
//! they are resolved exactly once into concrete paths ([`Resource`]) before
//! the copier runs.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_LIBRARY_EXTENSION;
use crate::vars::{VarError, Variables};

/// How a resource is copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
  /// Recursive copy of a directory tree.
  #[default]
  Folder,
  /// A single file copied into the target directory.
  File,
  /// Every file with the library extension under the source, flattened.
  #[serde(rename = "dlls", alias = "dll-set")]
  DllSet,
}

impl ResourceKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ResourceKind::Folder => "folder",
      ResourceKind::File => "file",
      ResourceKind::DllSet => "dlls",
    }
  }
}

impl fmt::Display for ResourceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A resource as declared in a manifest, with templated paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceSpec {
  pub name: String,
  pub source: String,
  pub target: String,
  #[serde(default)]
  pub kind: ResourceKind,
  #[serde(default)]
  pub optional: bool,
  /// File name suffix selected by `dlls` resources.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub extension: Option<String>,
}

impl ResourceSpec {
  pub fn new(name: &str, source: &str, target: &str, kind: ResourceKind) -> Self {
    Self {
      name: name.to_string(),
      source: source.to_string(),
      target: target.to_string(),
      kind,
      optional: false,
      extension: None,
    }
  }

  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }

  /// Expand both endpoints against resolved variables.
  pub fn resolve(&self, vars: &Variables) -> Result<Resource, VarError> {
    let source = vars.expand_path(&format!("resource '{}' source", self.name), &self.source)?;
    let target = vars.expand_path(&format!("resource '{}' target", self.name), &self.target)?;

    Ok(Resource {
      name: self.name.clone(),
      source,
      target,
      kind: self.kind,
      optional: self.optional,
      extension: self
        .extension
        .clone()
        .unwrap_or_else(|| DEFAULT_LIBRARY_EXTENSION.to_string()),
    })
  }
}

/// A resource with concrete paths, ready to copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
  pub name: String,
  pub source: PathBuf,
  pub target: PathBuf,
  pub kind: ResourceKind,
  pub optional: bool,
  pub extension: String,
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::consts::APP_NAME;
use crate::resource::ResourceSpec;
use crate::vars::VariableDecl;

/// Top-level manifest document (`shipkit.toml`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
  /// Variables shared by every profile and the tracker.
  #[serde(default)]
  pub variables: Vec<VariableDecl>,

  /// Named packaging profiles.
  #[serde(default)]
  pub profiles: IndexMap<String, Profile>,

  /// Build tracker settings.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tracker: Option<TrackerSpec>,
}

/// One packaging recipe: arguments, variables, directories and resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
  /// Banner template printed before packaging. Defaults to `Packaging <profile>`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,

  /// Names bound, in order, to the positional command line arguments.
  #[serde(default)]
  pub arguments: Vec<String>,

  /// Profile variables, resolved after the shared ones.
  #[serde(default)]
  pub variables: Vec<VariableDecl>,

  /// Directories removed before packaging.
  #[serde(default)]
  pub clean: Vec<String>,

  /// Directories created before packaging.
  #[serde(default)]
  pub create: Vec<String>,

  /// Resources copied in declaration order.
  #[serde(default)]
  pub resources: Vec<ResourceSpec>,
}

/// Build tracker settings with templated paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerSpec {
  /// Directory that `directories` are relative to.
  pub root: String,

  /// Directory holding the tracking file.
  pub tracking_dir: String,

  /// Source directories scanned for line counts.
  #[serde(default)]
  pub directories: Vec<String>,

  /// File name suffixes that are counted.
  #[serde(default)]
  pub extensions: Vec<String>,

  /// File names excluded from the count (vendored or generated sources).
  #[serde(default)]
  pub ignore: Vec<String>,

  /// The two fixed lines at the top of the tracking file.
  #[serde(default = "default_banner")]
  pub banner: [String; 2],
}

pub fn default_banner() -> [String; 2] {
  [
    "Build Information".to_string(),
    format!("Generated by {APP_NAME}"),
  ]
}

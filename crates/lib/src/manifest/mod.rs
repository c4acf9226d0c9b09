//! Manifest loading and resolution.
//!
//! A manifest holds the declarative tables that drive packaging and build
//! tracking: shared variables, named profiles and tracker settings. Loading
//! parses the TOML document and validates it; resolution turns a profile or
//! the tracker section into typed, fully expanded configuration.
//!
//! # Resolution Order
//!
//! 1. Built-ins (`manifest_dir`)
//! 2. Positional arguments bound to the profile's `arguments`
//! 3. Shared `variables`
//! 4. Profile `variables`

mod types;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub use types::*;

use crate::consts::{MANIFEST_DIR_VAR, MANIFEST_ENV, MANIFEST_FILENAME};
use crate::package::PackagePlan;
use crate::resource::ResourceKind;
use crate::tracker::TrackerConfig;
use crate::vars::{VarError, Variables};

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("manifest not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read manifest {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse manifest {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: Box<toml::de::Error>,
  },

  #[error("invalid manifest: {0}")]
  Invalid(String),

  #[error("unknown profile '{name}' (available: {})", available.join(", "))]
  UnknownProfile { name: String, available: Vec<String> },

  #[error("manifest {} has no [tracker] section", path.display())]
  NoTracker { path: PathBuf },

  #[error(transparent)]
  Resolve(#[from] VarError),
}

impl Manifest {
  /// Location of the manifest when none is given explicitly.
  ///
  /// Uses `SHIPKIT_MANIFEST` when set, otherwise `shipkit.toml` in the
  /// current directory.
  pub fn default_path() -> PathBuf {
    std::env::var_os(MANIFEST_ENV)
      .filter(|v| !v.is_empty())
      .map(PathBuf::from)
      .unwrap_or_else(|| PathBuf::from(MANIFEST_FILENAME))
  }

  /// Parse and validate a manifest document.
  pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }

  /// Load a manifest from disk.
  pub fn load(path: &Path) -> Result<LoadedManifest, ManifestError> {
    let content = match fs::read_to_string(path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(ManifestError::NotFound {
          path: path.to_path_buf(),
        });
      }
      Err(e) => {
        return Err(ManifestError::Read {
          path: path.to_path_buf(),
          source: e,
        });
      }
    };

    let manifest = Self::parse(&content).map_err(|e| ManifestError::Parse {
      path: path.to_path_buf(),
      source: Box::new(e),
    })?;
    manifest.validate()?;

    let path = dunce::canonicalize(path).map_err(|e| ManifestError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    debug!(path = %path.display(), profiles = manifest.profiles.len(), "loaded manifest");

    Ok(LoadedManifest { path, dir, manifest })
  }

  /// Check constraints the TOML schema cannot express.
  pub fn validate(&self) -> Result<(), ManifestError> {
    for (profile_name, profile) in &self.profiles {
      let mut seen = Vec::new();
      for argument in &profile.arguments {
        if seen.contains(&argument) {
          return Err(ManifestError::Invalid(format!(
            "profile '{profile_name}' declares argument '{argument}' twice"
          )));
        }
        seen.push(argument);
      }

      for resource in &profile.resources {
        match (&resource.kind, &resource.extension) {
          (ResourceKind::DllSet, Some(ext)) if ext.is_empty() => {
            return Err(ManifestError::Invalid(format!(
              "profile '{profile_name}': resource '{}' has an empty extension",
              resource.name
            )));
          }
          (ResourceKind::Folder | ResourceKind::File, Some(_)) => {
            return Err(ManifestError::Invalid(format!(
              "profile '{profile_name}': resource '{}' of kind '{}' does not take an extension",
              resource.name, resource.kind
            )));
          }
          _ => {}
        }
      }
    }

    let empty_extension = self
      .tracker
      .as_ref()
      .is_some_and(|tracker| tracker.extensions.iter().any(String::is_empty));
    if empty_extension {
      return Err(ManifestError::Invalid("tracker extensions must not be empty".to_string()));
    }

    Ok(())
  }
}

/// A manifest together with where it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedManifest {
  /// Canonical path of the manifest file.
  pub path: PathBuf,
  /// Canonical directory containing the manifest.
  pub dir: PathBuf,
  pub manifest: Manifest,
}

impl LoadedManifest {
  /// Built-in variables available to every template.
  pub fn builtins(&self) -> Variables {
    let mut vars = Variables::new();
    vars.insert(MANIFEST_DIR_VAR, self.dir.to_string_lossy());
    vars
  }

  pub fn profile(&self, name: &str) -> Result<&Profile, ManifestError> {
    self
      .manifest
      .profiles
      .get(name)
      .ok_or_else(|| ManifestError::UnknownProfile {
        name: name.to_string(),
        available: self.manifest.profiles.keys().cloned().collect(),
      })
  }

  /// Resolve every variable visible to a profile, given its positional arguments.
  pub fn profile_variables(&self, name: &str, args: &[String]) -> Result<Variables, ManifestError> {
    let profile = self.profile(name)?;

    let mut base = self.builtins();
    for (k, v) in Variables::from_arguments(&profile.arguments, args)?.iter() {
      base.insert(k, v);
    }

    let shared = base.resolve(&self.manifest.variables)?;
    Ok(shared.resolve(&profile.variables)?)
  }

  /// Resolve a profile into a typed packaging plan.
  pub fn plan(&self, name: &str, args: &[String]) -> Result<PackagePlan, ManifestError> {
    let vars = self.profile_variables(name, args)?;
    let profile = self.profile(name)?;
    Ok(PackagePlan::from_profile(name, profile, &vars)?)
  }

  /// Resolve the tracker section.
  pub fn tracker(&self) -> Result<TrackerConfig, ManifestError> {
    let spec = self.manifest.tracker.as_ref().ok_or_else(|| ManifestError::NoTracker {
      path: self.path.clone(),
    })?;

    let vars = self.builtins().resolve(&self.manifest.variables)?;
    Ok(TrackerConfig::from_spec(spec, &vars)?)
  }
}

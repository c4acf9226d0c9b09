//! Resource packaging pipeline.
//!
//! Packaging runs three stages strictly in order:
//!
//! 1. Clean: remove stale output directories
//! 2. Create: recreate them empty
//! 3. Copy: process every resource in declaration order
//!
//! Nothing is retried and nothing is rolled back. A fatal failure partway
//! through leaves a partially populated output directory behind.

pub mod clean;
pub mod copy;

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub use clean::{CleanOutcome, clean, clean_dir, create_dir, create_dirs};
pub use copy::{CopyOutcome, copy_resource, copy_tree};

use crate::manifest::Profile;
use crate::resource::{Resource, ResourceKind};
use crate::vars::{VarError, Variables};

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("could not clean {}, files are likely in use: {source}", path.display())]
  Clean {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create directory {}: {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("could not copy resource '{name}': {} ==> {}: {source}", from.display(), to.display())]
  CopyFolder {
    name: String,
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy file for resource '{name}': {} ==> {}: {source}", from.display(), to.display())]
  CopyFile {
    name: String,
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy libraries for resource '{name}' at {}: {source}", path.display())]
  CopyLibraries {
    name: String,
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl PackageError {
  /// Whether this is one of the failures that deliberately aborts the run
  /// (cleaning or folder copy blocked by files in use), as opposed to an
  /// unexpected fault.
  pub fn is_fatal(&self) -> bool {
    matches!(self, PackageError::Clean { .. } | PackageError::CopyFolder { .. })
  }
}

/// A fully resolved packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackagePlan {
  pub title: String,
  pub clean: Vec<PathBuf>,
  pub create: Vec<PathBuf>,
  pub resources: Vec<Resource>,
}

impl PackagePlan {
  /// Expand every template of a profile against resolved variables.
  pub fn from_profile(name: &str, profile: &Profile, vars: &Variables) -> Result<Self, VarError> {
    let title = match &profile.title {
      Some(title) => vars.expand("title", title)?,
      None => format!("Packaging {name}"),
    };

    let clean = profile
      .clean
      .iter()
      .map(|dir| vars.expand_path("clean directory", dir))
      .collect::<Result<Vec<_>, _>>()?;

    let create = profile
      .create
      .iter()
      .map(|dir| vars.expand_path("create directory", dir))
      .collect::<Result<Vec<_>, _>>()?;

    let resources = profile
      .resources
      .iter()
      .map(|spec| spec.resolve(vars))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      title,
      clean,
      create,
      resources,
    })
  }
}

/// Outcome of one resource in a packaging run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceReport {
  pub name: String,
  pub kind: ResourceKind,
  #[serde(flatten)]
  pub outcome: CopyOutcome,
}

/// Summary of a packaging run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageReport {
  pub title: String,
  pub cleaned: usize,
  pub created: usize,
  pub resources: Vec<ResourceReport>,
}

impl PackageReport {
  pub fn files_copied(&self) -> usize {
    self
      .resources
      .iter()
      .map(|r| match r.outcome {
        CopyOutcome::Copied { files } => files,
        _ => 0,
      })
      .sum()
  }

  pub fn copied(&self) -> usize {
    self.count(|o| matches!(o, CopyOutcome::Copied { .. }))
  }

  pub fn skipped(&self) -> usize {
    self.count(|o| matches!(o, CopyOutcome::SkippedOptional))
  }

  pub fn missing(&self) -> usize {
    self.count(|o| matches!(o, CopyOutcome::Missing))
  }

  fn count(&self, pred: impl Fn(&CopyOutcome) -> bool) -> usize {
    self.resources.iter().filter(|r| pred(&r.outcome)).count()
  }
}

/// Run a packaging plan: clean, create, then copy each resource in order.
pub fn package(plan: &PackagePlan) -> Result<PackageReport, PackageError> {
  info!(title = %plan.title, resources = plan.resources.len(), "starting packaging");

  let mut report = PackageReport {
    title: plan.title.clone(),
    ..Default::default()
  };

  report.cleaned = clean(&plan.clean)?;
  report.created = create_dirs(&plan.create)?;

  for resource in &plan.resources {
    let outcome = copy_resource(resource)?;
    report.resources.push(ResourceReport {
      name: resource.name.clone(),
      kind: resource.kind,
      outcome,
    });
  }

  info!(
    copied = report.copied(),
    skipped = report.skipped(),
    missing = report.missing(),
    files = report.files_copied(),
    "packaging complete"
  );

  Ok(report)
}

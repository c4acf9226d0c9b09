//! Build tracker.
//!
//! Each run counts the lines of the tracked sources, increments the persisted
//! build number and prepends a history entry to the tracking file. The
//! tracker is independent of packaging and only shares the manifest's
//! variables with it.

pub mod count;
pub mod store;

use std::io;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

pub use count::{CountRules, LineCount, count_directories};
pub use store::{BuildRecord, TrackingStore, TrackingTransaction};

use crate::manifest::TrackerSpec;
use crate::vars::{VarError, Variables};

#[derive(Debug, Error)]
pub enum TrackerError {
  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create tracking directory {}: {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to scan {}: {source}", path.display())]
  Walk {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("build number '{0}' in tracking file is too large")]
  InvalidBuildNumber(String),

  #[error("build number {0} cannot be incremented")]
  BuildNumberOverflow(u64),
}

/// Tracker settings with every path resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerConfig {
  pub root: PathBuf,
  pub tracking_dir: PathBuf,
  /// Source directories, already joined onto `root`.
  pub directories: Vec<PathBuf>,
  pub extensions: Vec<String>,
  pub ignore: Vec<String>,
  pub banner: [String; 2],
}

impl TrackerConfig {
  pub fn from_spec(spec: &TrackerSpec, vars: &Variables) -> Result<Self, VarError> {
    let root = vars.expand_path("tracker root", &spec.root)?;
    let tracking_dir = vars.expand_path("tracker tracking_dir", &spec.tracking_dir)?;
    let directories = spec
      .directories
      .iter()
      .map(|dir| vars.expand_path("tracker directory", dir).map(|dir| root.join(dir)))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      root,
      tracking_dir,
      directories,
      extensions: spec.extensions.clone(),
      ignore: spec.ignore.clone(),
      banner: spec.banner.clone(),
    })
  }

  pub fn store(&self) -> TrackingStore {
    TrackingStore::new(&self.tracking_dir).with_banner(self.banner.clone())
  }

  pub fn rules(&self) -> CountRules<'_> {
    CountRules {
      extensions: &self.extensions,
      ignore: &self.ignore,
    }
  }
}

/// Outcome of one tracker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackReport {
  pub build_number: u64,
  pub lines: LineCount,
  pub tracking_file: PathBuf,
  pub timestamp: String,
}

/// Count lines and record a new build.
pub fn track(config: &TrackerConfig, timestamp: NaiveDateTime) -> Result<TrackReport, TrackerError> {
  let lines = count_directories(&config.directories, config.rules())?;

  let store = config.store();
  let record = store.begin()?.commit(lines.total, timestamp)?;

  info!(build = record.build_number, lines = lines.total, "recorded build");

  Ok(TrackReport {
    build_number: record.build_number,
    lines,
    tracking_file: store.path(),
    timestamp: timestamp.format(store::TIMESTAMP_FORMAT).to_string(),
  })
}

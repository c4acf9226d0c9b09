//! Tracking file storage.
//!
//! # File Layout
//!
//! ```text
//! <banner line 1>
//! <banner line 2>
//! BUILD VERSION: 42
//!
//! Build	2024-03-01 18:22	51234	42
//! Build	2024-03-01 17:05	51190	41
//! ...
//! ```
//!
//! The newest history entry comes first. Entries are tab separated:
//! timestamp, cumulative line count, build number.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::TrackerError;
use crate::consts::{LEGACY_TRACKING_FILENAMES, TRACKING_FILENAME};
use crate::manifest::default_banner;

/// Timestamp format used in history entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

static VERSION_LINE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"BUILD VERSION:\s*(\d+)").expect("version line pattern is valid"));

/// Parsed contents of a tracking file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildRecord {
  pub build_number: u64,
  /// History lines, newest first, kept verbatim.
  pub history: Vec<String>,
}

impl BuildRecord {
  /// Parse a tracking file.
  ///
  /// The first two lines are the banner and are ignored. The build number is
  /// read from the third line and defaults to 0 when that line carries no
  /// version. Every later non-blank line is history.
  ///
  /// # Errors
  ///
  /// Fails with [`TrackerError::InvalidBuildNumber`] when the version digits
  /// do not fit in a `u64`.
  pub fn parse(content: &str) -> Result<Self, TrackerError> {
    let mut lines = content.lines().skip(2);
    let digits = lines
      .next()
      .and_then(|line| VERSION_LINE.captures(line))
      .and_then(|caps| caps.get(1));

    let build_number = match digits {
      Some(m) => m
        .as_str()
        .parse::<u64>()
        .map_err(|_| TrackerError::InvalidBuildNumber(m.as_str().to_string()))?,
      None => 0,
    };

    let history = lines
      .filter(|line| !line.trim().is_empty())
      .map(str::to_string)
      .collect();

    Ok(Self { build_number, history })
  }

  /// Render the full tracking file.
  pub fn render(&self, banner: &[String; 2]) -> String {
    let mut out = format!("{}\n{}\nBUILD VERSION: {}\n\n", banner[0], banner[1], self.build_number);
    for line in &self.history {
      out.push_str(line);
      out.push('\n');
    }
    out
  }
}

/// Format one history entry.
pub fn history_entry(timestamp: NaiveDateTime, line_count: u64, build_number: u64) -> String {
  format!(
    "Build\t{}\t{}\t{}",
    timestamp.format(TIMESTAMP_FORMAT),
    line_count,
    build_number
  )
}

/// The tracking file inside a tracking directory.
#[derive(Debug, Clone)]
pub struct TrackingStore {
  dir: PathBuf,
  banner: [String; 2],
}

impl TrackingStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self {
      dir: dir.into(),
      banner: default_banner(),
    }
  }

  pub fn with_banner(mut self, banner: [String; 2]) -> Self {
    self.banner = banner;
    self
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Path of the canonical tracking file. Commits always write here.
  pub fn path(&self) -> PathBuf {
    self.dir.join(TRACKING_FILENAME)
  }

  /// The file to read from: the canonical one, or a legacy one if only that exists.
  fn source_path(&self) -> Option<PathBuf> {
    std::iter::once(TRACKING_FILENAME)
      .chain(LEGACY_TRACKING_FILENAMES.iter().copied())
      .map(|name| self.dir.join(name))
      .find(|path| path.is_file())
  }

  /// Read the current record and start a read-modify-write cycle.
  pub fn begin(&self) -> Result<TrackingTransaction<'_>, TrackerError> {
    let Some(source) = self.source_path() else {
      info!(path = %self.path().display(), "no tracking file found, starting from build 0");
      return Ok(TrackingTransaction {
        store: self,
        record: BuildRecord::default(),
        source: None,
        original: None,
      });
    };

    let content = fs::read_to_string(&source).map_err(|e| TrackerError::Read {
      path: source.clone(),
      source: e,
    })?;
    let record = BuildRecord::parse(&content)?;

    if source != self.path() {
      info!(path = %source.display(), "importing legacy tracking file");
    }
    debug!(path = %source.display(), build = record.build_number, history = record.history.len(), "loaded tracking file");

    let original = (source == self.path()).then_some(content);
    Ok(TrackingTransaction {
      store: self,
      record,
      source: Some(source),
      original,
    })
  }

  fn ensure_dir(&self) -> Result<(), TrackerError> {
    fs::create_dir_all(&self.dir).map_err(|e| TrackerError::CreateDir {
      path: self.dir.clone(),
      source: e,
    })
  }

  /// Replace the canonical file through a temp file and rename.
  fn write(&self, content: &str) -> Result<(), TrackerError> {
    self.ensure_dir()?;

    let path = self.path();
    let temp_path = self.dir.join(format!("{TRACKING_FILENAME}.tmp"));

    fs::write(&temp_path, content).map_err(|e| TrackerError::Write {
      path: temp_path.clone(),
      source: e,
    })?;
    fs::rename(&temp_path, &path).map_err(|e| TrackerError::Write { path, source: e })?;

    Ok(())
  }

  fn read_current(&self) -> Result<Option<String>, TrackerError> {
    let path = self.path();
    match fs::read_to_string(&path) {
      Ok(content) => Ok(Some(content)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(TrackerError::Read { path, source: e }),
    }
  }
}

/// A loaded record waiting to be incremented and written back.
///
/// Nothing locks the file between [`TrackingStore::begin`] and
/// [`TrackingTransaction::commit`]. Two overlapping transactions both commit
/// and the later one wins; the lost update is logged as a warning.
#[derive(Debug)]
pub struct TrackingTransaction<'a> {
  store: &'a TrackingStore,
  record: BuildRecord,
  source: Option<PathBuf>,
  /// Canonical file content as read, `None` if it did not exist.
  original: Option<String>,
}

impl TrackingTransaction<'_> {
  pub fn record(&self) -> &BuildRecord {
    &self.record
  }

  /// File the record was read from, if any.
  pub fn source(&self) -> Option<&Path> {
    self.source.as_deref()
  }

  /// Increment the build number, prepend a history entry and rewrite the file.
  pub fn commit(self, line_count: u64, timestamp: NaiveDateTime) -> Result<BuildRecord, TrackerError> {
    let build_number = self
      .record
      .build_number
      .checked_add(1)
      .ok_or(TrackerError::BuildNumberOverflow(self.record.build_number))?;

    let mut history = Vec::with_capacity(self.record.history.len() + 1);
    history.push(history_entry(timestamp, line_count, build_number));
    history.extend(self.record.history);
    let record = BuildRecord { build_number, history };

    if self.store.read_current()? != self.original {
      warn!(
        path = %self.store.path().display(),
        "tracking file changed since it was read, overwriting"
      );
    }

    self.store.write(&record.render(&self.store.banner))?;
    debug!(path = %self.store.path().display(), build = build_number, "wrote tracking file");

    Ok(record)
  }
}

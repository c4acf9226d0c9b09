//! Implementation of the `shipkit track` command.

use std::path::Path;

use anyhow::{Context, Result};

use shipkit_lib::tracker::track;

use super::load_manifest;
use crate::output::{OutputFormat, print_header, print_info, print_json, print_stat, print_success};

/// Count lines in the tracked sources and record a new build.
pub fn cmd_track(manifest: Option<&Path>, output: OutputFormat) -> Result<()> {
  let loaded = load_manifest(manifest)?;
  let config = loaded.tracker()?;

  let now = chrono::Local::now().naive_local();
  let report = track(&config, now).context("Build tracking failed")?;

  if output.is_json() {
    return print_json(&report);
  }

  print_header("Build Statistics");
  for (extension, lines) in &report.lines.by_extension {
    print_stat(&format!("Lines in {extension} files"), &lines.to_string());
  }
  println!();
  if report.build_number == 1 {
    print_info("No earlier builds recorded, starting a new history");
  }
  print_success(&format!("Recorded build {}", report.build_number));
  print_stat("Lines of code", &report.lines.total.to_string());
  print_stat("Tracking file", &report.tracking_file.display().to_string());

  Ok(())
}

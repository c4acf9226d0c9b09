//! Implementation of the `shipkit package` command.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use shipkit_lib::package::{CopyOutcome, ResourceReport, package};

use super::load_manifest;
use crate::output::{
  OutputFormat, count, format_duration, print_header, print_json, print_stat, print_success, print_warning, symbols,
};

/// Execute the package command.
///
/// Resolves the profile against the positional arguments, then runs the
/// clean, create and copy stages. A fatal clean or copy failure stops the
/// run and leaves whatever was already copied in place.
pub fn cmd_package(manifest: Option<&Path>, profile: &str, args: &[String], output: OutputFormat) -> Result<()> {
  let start = Instant::now();

  let loaded = load_manifest(manifest)?;
  let plan = loaded
    .plan(profile, args)
    .with_context(|| format!("Failed to resolve profile '{profile}'"))?;

  if !output.is_json() {
    print_header(&plan.title);
  }

  let report = package(&plan).with_context(|| format!("Packaging '{profile}' failed"))?;

  if output.is_json() {
    return print_json(&report);
  }

  println!();
  for resource in &report.resources {
    print_resource(resource);
  }

  println!();
  print_success("Packaging complete!");
  print_stat("Resources copied", &report.copied().to_string());
  print_stat("Optional skipped", &report.skipped().to_string());
  print_stat("Missing", &report.missing().to_string());
  print_stat("Files copied", &report.files_copied().to_string());
  print_stat("Duration", &format_duration(start.elapsed()));

  if report.missing() > 0 {
    print_warning(&format!(
      "{} could not be found",
      count(report.missing(), "required resource")
    ));
  }

  Ok(())
}

fn print_resource(resource: &ResourceReport) {
  match resource.outcome {
    CopyOutcome::Copied { files } => println!(
      "  {} {} ({})",
      symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.green()),
      resource.name,
      count(files, "file")
    ),
    CopyOutcome::SkippedOptional => println!(
      "  {} {} {}",
      symbols::SKIP.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      resource.name,
      "(optional, not found)".if_supports_color(Stream::Stdout, |s| s.dimmed())
    ),
    CopyOutcome::Missing => println!(
      "  {} {} {}",
      symbols::WARNING.if_supports_color(Stream::Stdout, |s| s.yellow()),
      resource.name,
      "(not found)".if_supports_color(Stream::Stdout, |s| s.yellow())
    ),
  }
}

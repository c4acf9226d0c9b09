//! Implementation of the `shipkit vars` command.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use super::load_manifest;
use crate::output::{OutputFormat, print_json};

/// Print every variable visible to a profile, in resolution order.
pub fn cmd_vars(manifest: Option<&Path>, profile: &str, args: &[String], output: OutputFormat) -> Result<()> {
  let loaded = load_manifest(manifest)?;
  let vars = loaded
    .profile_variables(profile, args)
    .with_context(|| format!("Failed to resolve profile '{profile}'"))?;

  if output.is_json() {
    return print_json(&vars);
  }

  let width = vars.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
  for (name, value) in vars.iter() {
    println!(
      "{:<width$}  {}",
      name.if_supports_color(Stream::Stdout, |s| s.cyan()),
      value
    );
  }

  Ok(())
}

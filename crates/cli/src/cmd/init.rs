//! Implementation of the `shipkit init` command.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use shipkit_lib::init::init;

use crate::output::symbols;

/// Write a starter `shipkit.toml` into `dir`.
///
/// # Errors
///
/// Returns an error if a manifest already exists there or it cannot be written.
pub fn cmd_init(dir: &Path) -> Result<()> {
  let result = init(dir).context("Failed to initialize manifest")?;

  println!(
    "{} {}",
    symbols::SUCCESS.green(),
    "Created shipkit manifest!".green().bold()
  );
  println!();
  println!("  {} Manifest: {}", symbols::INFO.cyan(), result.manifest.display());
  println!();
  println!("{}", "Next steps:".bold());
  println!(
    "  1. Edit {} to match your project layout",
    result.manifest.display().to_string().cyan()
  );
  println!("  2. Run: {}", "shipkit vars application <args>".cyan());
  println!("  3. Run: {}", "shipkit package application <args>".cyan());

  Ok(())
}

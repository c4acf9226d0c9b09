mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// shipkit - package native builds and track build numbers
#[derive(Parser)]
#[command(name = "shipkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Manifest to load (default: $SHIPKIT_MANIFEST, then ./shipkit.toml)
  #[arg(short, long, global = true)]
  manifest: Option<PathBuf>,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Run a packaging profile: clean, create, then copy its resources
  Package {
    /// Profile name from the manifest
    profile: String,

    /// Positional values bound to the profile's arguments
    args: Vec<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Print the resolved variables of a profile
  Vars {
    /// Profile name from the manifest
    profile: String,

    /// Positional values bound to the profile's arguments
    args: Vec<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Count source lines and record a new build number
  Track {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Write a starter manifest
  Init {
    /// Directory to write shipkit.toml into
    #[arg(default_value = ".")]
    dir: PathBuf,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .with_target(false)
    .init();

  let manifest = cli.manifest.as_deref();
  let result = match cli.command {
    Commands::Package { profile, args, output } => cmd::cmd_package(manifest, &profile, &args, output),
    Commands::Vars { profile, args, output } => cmd::cmd_vars(manifest, &profile, &args, output),
    Commands::Track { output } => cmd::cmd_track(manifest, output),
    Commands::Init { dir } => cmd::cmd_init(&dir),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}

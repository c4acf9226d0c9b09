mod init;
mod package;
mod track;
mod vars;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use shipkit_lib::manifest::{LoadedManifest, Manifest};

pub use init::cmd_init;
pub use package::cmd_package;
pub use track::cmd_track;
pub use vars::cmd_vars;

/// Load the manifest given on the command line, or the default one.
fn load_manifest(path: Option<&Path>) -> Result<LoadedManifest> {
  let path = path.map(PathBuf::from).unwrap_or_else(Manifest::default_path);
  debug!(path = %path.display(), "loading manifest");
  Manifest::load(&path).with_context(|| format!("Failed to load manifest {}", path.display()))
}

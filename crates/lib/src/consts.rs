//! Names and defaults shared across the crate.

/// Application name, used for banners and default file names.
pub const APP_NAME: &str = "shipkit";

/// Default manifest file name looked up in the working directory.
pub const MANIFEST_FILENAME: &str = "shipkit.toml";

/// Environment variable overriding the manifest location.
pub const MANIFEST_ENV: &str = "SHIPKIT_MANIFEST";

/// Built-in variable holding the canonical directory of the loaded manifest.
pub const MANIFEST_DIR_VAR: &str = "manifest_dir";

/// Extension used by library-set resources when none is configured.
pub const DEFAULT_LIBRARY_EXTENSION: &str = ".dll";

/// Canonical tracking file name.
pub const TRACKING_FILENAME: &str = "build_version.txt";

/// Older tracking file names, imported once when the canonical file is absent.
pub const LEGACY_TRACKING_FILENAMES: &[&str] = &["BuildVersion.txt"];

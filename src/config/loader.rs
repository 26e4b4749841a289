// src/config/loader.rs

use std::path::Path;

use tracing::debug;

use crate::config::model::{LauncherConfig, RawLauncherConfig};
use crate::errors::{LauncherError, Result};
use crate::fs::FileSystem;

/// Read the engine profile at `path` without semantic validation.
///
/// A missing file is not an error: the built-in defaults apply.
pub fn load_from_path(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<RawLauncherConfig> {
    let path = path.as_ref();
    if !fs.is_file(path) {
        debug!(path = %path.display(), "no engine profile found; using built-in defaults");
        return Ok(RawLauncherConfig::default());
    }

    let contents = fs.read_to_string(path)?;
    let config: RawLauncherConfig =
        toml::from_str(&contents).map_err(|source| LauncherError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), "loaded engine profile");
    Ok(config)
}

/// Load the engine profile and validate it.
pub fn load_and_validate(fs: &dyn FileSystem, path: impl AsRef<Path>) -> Result<LauncherConfig> {
    let raw = load_from_path(fs, path)?;
    LauncherConfig::try_from(raw)
}

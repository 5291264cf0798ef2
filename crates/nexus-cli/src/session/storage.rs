//! Session file location.

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// `session.json` in the platform data directory.
pub fn default_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "nexusvoice").context("Could not determine data directory")?;

    Ok(dirs.data_dir().join("session.json"))
}

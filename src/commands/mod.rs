//! CLI command handlers

pub mod comments;
pub mod config;
pub mod transcript;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use tubesift::{Config, Error};

/// Resolve the config file: the `--config` override or the default location.
pub fn config_file(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(Config::config_path()?),
    }
}

/// Load the effective configuration.
///
/// An explicit `--config` file must parse. Problems with the default
/// location only produce a warning and fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    match Config::config_path() {
        Ok(path) => Ok(Config::load_or_default(&path)),
        Err(Error::NoConfigDir) => {
            tracing::warn!("no config directory on this system, using defaults");
            Ok(Config::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Read an input file, with a readable error when it is missing.
pub fn read_input(file: &Path) -> Result<String> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }
    fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))
}

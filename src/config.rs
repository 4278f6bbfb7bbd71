//! Configuration management for tubesift

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::comments::{FilterOptions, FilterThresholds};
use crate::error::{Error, Result};
use crate::transcript::TranscriptConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transcript: TranscriptConfig,
    pub filter: FilterConfig,
}

/// Comment filter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Master switch; when false no comment is ever removed
    pub enabled: bool,
    pub remove_spam: bool,
    pub remove_noise: bool,
    pub remove_unrelated: bool,
    pub thresholds: FilterThresholds,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            remove_spam: true,
            remove_noise: true,
            remove_unrelated: true,
            thresholds: FilterThresholds::default(),
        }
    }
}

impl FilterConfig {
    pub fn options(&self) -> FilterOptions {
        FilterOptions {
            enable_filtering: self.enabled,
            remove_spam: self.remove_spam,
            remove_noise: self.remove_noise,
            remove_unrelated: self.remove_unrelated,
        }
    }
}

impl Config {
    /// Load config from the default location, or defaults if no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`Config::load_from`], but a broken file falls back to defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "ignoring config file, using defaults");
                Self::default()
            }
        }
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = self.to_toml()?;
        fs::write(path, content).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(config_dir.join("tubesift").join("config.toml"))
    }
}

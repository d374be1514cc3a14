//! Application configuration management.
//!
//! Persisted defaults for settings the user would otherwise repeat on
//! every invocation: the ffprobe location and the cache file path. CLI
//! flags override the config, the config overrides built-in defaults.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// ffprobe executable, if not the one on `PATH`.
    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,
    /// Scan cache location, if not the platform default.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// A missing or malformed config file yields the defaults.
    #[must_use]
    pub fn load() -> Self {
        match Self::load_internal() {
            Ok(config) => config,
            Err(e) => {
                log::debug!("failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    fn load_internal() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// The platform-specific default cache file location.
    #[must_use]
    pub fn default_cache_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.cache_dir().join("scan_cache.json"))
            .unwrap_or_else(|| PathBuf::from("scan_cache.json"))
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = project_dirs()
            .ok_or_else(|| anyhow::anyhow!("failed to determine project directories"))?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "atmoscan", "atmoscan")
}

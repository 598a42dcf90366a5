// SPDX-License-Identifier: MPL-2.0
//! This module handles the resolver's configuration, including loading and
//! saving it to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use thumbnail_resolver::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.default_size = 512;
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.default_size, 512);
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::error::Result;
use crate::infrastructure::fast_path::PlatformTier;
use defaults::{
    DEFAULT_CACHE_MAX_BYTES, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_DISK_CACHE_MAX_BYTES,
    DEFAULT_THUMBNAIL_SIZE, MAX_DISK_CACHE_MAX_BYTES, MAX_THUMBNAIL_SIZE,
    MIN_DISK_CACHE_MAX_BYTES, MIN_THUMBNAIL_SIZE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ThumbnailResolver";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edge length used for dimensions the caller leaves unset.
    pub default_size: u32,
    /// Forces a platform tier instead of detecting it.
    pub platform_tier: Option<PlatformTier>,
    /// Root of the legacy mini-thumbnail store.
    pub legacy_store_dir: Option<PathBuf>,
    /// Legacy store thumbnails are already display-oriented.
    pub legacy_store_pre_rotated: bool,
    pub cache_max_bytes: usize,
    pub cache_max_entries: usize,
    /// Enables the on-disk source cache in this directory.
    pub disk_cache_dir: Option<PathBuf>,
    /// Size budget of the disk source cache, oldest entries go first.
    pub disk_cache_max_bytes: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_THUMBNAIL_SIZE,
            platform_tier: None,
            legacy_store_dir: None,
            legacy_store_pre_rotated: false,
            cache_max_bytes: DEFAULT_CACHE_MAX_BYTES,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
            disk_cache_dir: None,
            disk_cache_max_bytes: DEFAULT_DISK_CACHE_MAX_BYTES,
        }
    }
}

impl Config {
    /// Default size clamped to the supported range.
    #[must_use]
    pub fn default_size(&self) -> u32 {
        self.default_size
            .clamp(MIN_THUMBNAIL_SIZE, MAX_THUMBNAIL_SIZE)
    }

    /// Disk cache budget clamped to the supported range.
    #[must_use]
    pub fn disk_cache_max_bytes(&self) -> u64 {
        self.disk_cache_max_bytes
            .clamp(MIN_DISK_CACHE_MAX_BYTES, MAX_DISK_CACHE_MAX_BYTES)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the user config directory, or defaults.
///
/// # Errors
///
/// Returns an error if an existing settings file cannot be read.
pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

/// Saves the configuration to the user config directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file. Invalid TOML falls back to defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            log::warn!("Invalid settings in {}, using defaults: {e}", path.display());
            Ok(Config::default())
        }
    }
}

/// Saves a configuration file, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            default_size: 320,
            platform_tier: Some(PlatformTier::Legacy),
            legacy_store_dir: Some(PathBuf::from("/var/thumbs")),
            legacy_store_pre_rotated: true,
            cache_max_bytes: 8 * 1024 * 1024,
            cache_max_entries: 32,
            disk_cache_dir: Some(PathBuf::from("/var/cache/thumbs")),
            disk_cache_max_bytes: 16 * 1024 * 1024,
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_keys_take_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "platform_tier = \"none\"\n").expect("failed to write toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded.platform_tier, Some(PlatformTier::None));
        assert_eq!(loaded.default_size, DEFAULT_THUMBNAIL_SIZE);
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn default_size_is_clamped() {
        let config = Config {
            default_size: 0,
            ..Config::default()
        };
        assert_eq!(config.default_size(), MIN_THUMBNAIL_SIZE);
    }

    #[test]
    fn disk_cache_budget_is_clamped() {
        let config = Config {
            disk_cache_max_bytes: 1,
            ..Config::default()
        };
        assert_eq!(config.disk_cache_max_bytes(), MIN_DISK_CACHE_MAX_BYTES);
    }
}

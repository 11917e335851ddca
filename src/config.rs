// SPDX-License-Identifier: MPL-2.0
//! Manager configuration: defaults, runtime reconfiguration, and
//! persistence of host preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use toastline::config::{self, ManagerConfig, ConfigPatch};
//! use toastline::notification::Expiry;
//!
//! // Load persisted settings, falling back to defaults.
//! let mut config = config::load().unwrap_or_default();
//!
//! // Adjust and persist.
//! config.limit = 4;
//! config.duration = Expiry::from_millis(4000);
//! config::save(&config).expect("Failed to save config");
//!
//! // Partial updates merge over the current values.
//! config.apply(&ConfigPatch::default().with_static_mode(true));
//! assert!(config.static_mode);
//! ```

use crate::error::Result;
use crate::notification::Expiry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Toastline";

/// Default maximum number of concurrently active notifications.
pub const DEFAULT_LIMIT: usize = 2;

/// Default auto-expiry in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 6000;

/// Settings governing admission and expiry of notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Maximum number of concurrently active notifications.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Default time a notification stays active. Per-notification
    /// expiries override this.
    #[serde(default = "default_duration")]
    pub duration: Expiry,
    /// If `true`, expired or closed notifications keep their slot with
    /// status `Inactive` until explicitly unmounted.
    #[serde(rename = "static", default)]
    pub static_mode: bool,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_duration() -> Expiry {
    Expiry::Finite(Duration::from_millis(DEFAULT_DURATION_MS))
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            duration: default_duration(),
            static_mode: false,
        }
    }
}

impl ManagerConfig {
    /// Merges `patch` into `self`; unspecified fields keep their values.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(limit) = patch.limit {
            self.limit = limit;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(static_mode) = patch.static_mode {
            self.static_mode = static_mode;
        }
    }
}

/// Partial [`ManagerConfig`] for runtime reconfiguration.
///
/// Only the populated fields are applied; the rest of the configuration
/// is left untouched. Changes affect notifications added afterwards -
/// in-flight notifications keep their already-resolved expiry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Expiry>,
    #[serde(rename = "static", default, skip_serializing_if = "Option::is_none")]
    pub static_mode: Option<bool>,
}

impl ConfigPatch {
    /// Sets the admission limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the default expiry.
    #[must_use]
    pub fn with_duration(mut self, duration: Expiry) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets static (retain-until-unmount) mode.
    #[must_use]
    pub fn with_static_mode(mut self, static_mode: bool) -> Self {
        self.static_mode = Some(static_mode);
        self
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the persisted configuration from the platform config directory,
/// falling back to defaults when no file exists.
pub fn load() -> Result<ManagerConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(ManagerConfig::default())
}

/// Saves the configuration to the platform config directory.
pub fn save(config: &ManagerConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration from a specific path. Missing fields take their
/// defaults, so partial files are valid.
pub fn load_from_path(path: &Path) -> Result<ManagerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves a configuration to a specific path, creating parent directories
/// as needed.
pub fn save_to_path(config: &ManagerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

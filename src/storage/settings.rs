//! Settings storage
//!
//! Manages persistence of user preferences and application settings.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Default remote endpoint for quote reconciliation
pub const DEFAULT_SYNC_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Remote endpoint the reconciler reads from and writes to
    #[serde(default = "default_sync_endpoint")]
    pub sync_endpoint: String,
    /// Seconds between reconciliation cycles
    #[serde(default = "default_sync_interval")]
    pub sync_interval_secs: u64,
    /// Run the reconciler automatically on its interval
    #[serde(default = "default_auto_sync")]
    pub auto_sync: bool,
    /// Push a newly added quote to the remote endpoint immediately
    #[serde(default)]
    pub push_on_add: bool,
    /// UI theme: "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_sync_endpoint() -> String {
    DEFAULT_SYNC_ENDPOINT.to_string()
}

fn default_sync_interval() -> u64 {
    15
}

fn default_auto_sync() -> bool {
    true
}

fn default_theme() -> String {
    "dark".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            sync_endpoint: default_sync_endpoint(),
            sync_interval_secs: default_sync_interval(),
            auto_sync: default_auto_sync(),
            push_on_add: false,
            theme: default_theme(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Repairs out-of-range or empty values loaded from disk.
    pub fn validate(&mut self) {
        if self.sync_endpoint.trim().is_empty() {
            self.sync_endpoint = default_sync_endpoint();
        }

        self.sync_interval_secs = self.sync_interval_secs.clamp(5, 3600);

        if self.theme != "dark" && self.theme != "light" {
            self.theme = default_theme();
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match load_settings_internal() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_internal() -> Result<AppSettings, StorageError> {
    let path = get_settings_path()?;

    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(&path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;

    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

//! User settings persistence.
//!
//! This module handles loading and saving user preferences across sessions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::downsample::DecimationInterval;
use crate::series::TagLimits;

/// User settings that persist across sessions
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSettings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Decimation interval preselected in the interval picker
    #[serde(default)]
    pub default_interval: DecimationInterval,
    /// Upper threshold applied to tags without their own limits
    #[serde(default = "default_upper_limit")]
    pub default_upper_limit: Option<f64>,
    /// Lower threshold applied to tags without their own limits
    #[serde(default = "default_lower_limit")]
    pub default_lower_limit: Option<f64>,
    /// Base URL of the telemetry backend
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_version() -> u32 {
    1
}

fn default_upper_limit() -> Option<f64> {
    Some(42.0)
}

fn default_lower_limit() -> Option<f64> {
    Some(18.0)
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            version: 1,
            default_interval: DecimationInterval::default(),
            default_upper_limit: default_upper_limit(),
            default_lower_limit: default_lower_limit(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl UserSettings {
    /// Limits applied to tags that have no entry of their own.
    pub fn default_limits(&self) -> TagLimits {
        TagLimits::new(self.default_upper_limit, self.default_lower_limit)
    }

    /// Get the config directory path for Rigview
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("Rigview"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|p| p.join("Rigview"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|p| p.join("rigview"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            dirs::config_dir().map(|p| p.join("rigview"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        let path = match Self::get_settings_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), String> {
        let path = Self::get_settings_path()
            .ok_or_else(|| "Could not determine config directory".to_string())?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        std::fs::write(&path, content)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }
}

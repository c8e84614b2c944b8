//! Player preferences and game configuration
//!
//! Persisted as a JSON file next to the best-times record.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::SettingsError;

/// Settings file name used by the binary
pub const SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Best-times record location
    pub best_times_path: String,
    /// Fixed RNG seed; a fresh seed per run when absent
    pub seed: Option<u64>,
    /// Arena, pool and timing parameters
    pub game: GameConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.1,
            best_times_path: "lowestTime.txt".to_string(),
            seed: None,
            game: GameConfig::default(),
        }
    }
}

impl Settings {
    /// Clamp and store a new music volume
    pub fn set_volume(&mut self, volume: f32) {
        self.music_volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Load from a JSON file; a missing file gives defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let mut settings: Settings = serde_json::from_str(&json)?;
        settings.game.validate()?;
        settings.set_volume(settings.music_volume);
        Ok(settings)
    }

    /// Load, logging any problem and falling back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::error!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}

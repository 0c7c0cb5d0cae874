//! User configuration file handling
//!
//! Manages settings from ~/.config/wardo/settings.json

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration from ~/.config/wardo/settings.json
///
/// These settings override built-in defaults but are overridden by CLI
/// arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Default room size as "WxDxH" in meters
    pub default_room: Option<String>,
    /// Default product catalog path
    pub default_catalog: Option<PathBuf>,
}

impl ConfigFile {
    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("wardo").join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse settings.json: {}", e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read settings.json: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let config = ConfigFile {
            default_room: Some("5x4x2.6".to_string()),
            default_catalog: Some(PathBuf::from("catalog.json")),
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded.default_room.as_deref(), Some("5x4x2.6"));
        assert_eq!(loaded.default_catalog, config.default_catalog);
    }

    #[test]
    fn malformed_files_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(ConfigFile::load_from(&path).is_none());
        assert!(ConfigFile::load_from(&dir.path().join("missing.json")).is_none());
    }
}

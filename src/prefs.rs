//! Persisted UI preferences
//!
//! Collapsed flag and pixel width for the left and right panels, stored
//! as JSON in the platform config directory. Any read problem falls back
//! to defaults; the viewer never fails over preferences.

use crate::constants::panel;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPrefs {
    pub left_collapsed: bool,
    pub left_width: f32,
    pub right_collapsed: bool,
    pub right_width: f32,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            left_collapsed: false,
            left_width: panel::SIDEBAR_DEFAULT_WIDTH,
            right_collapsed: false,
            right_width: panel::TOOLBAR_DEFAULT_WIDTH,
        }
    }
}

impl UiPrefs {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match prefs_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("ignoring malformed prefs at {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = prefs_path().ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        let text = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize prefs: {}", e))?;
        std::fs::write(path, text)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
    }
}

fn prefs_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("maquette").join("ui_prefs.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefs_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ui_prefs.json");

        let prefs = UiPrefs {
            left_collapsed: true,
            left_width: 333.0,
            right_collapsed: false,
            right_width: 210.0,
        };
        prefs.save_to(&path).unwrap();
        assert_eq!(UiPrefs::load_from(&path), prefs);
    }

    #[test]
    fn missing_or_malformed_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert_eq!(UiPrefs::load_from(&missing), UiPrefs::default());

        let garbled = dir.path().join("bad.json");
        std::fs::write(&garbled, "{not json").unwrap();
        assert_eq!(UiPrefs::load_from(&garbled), UiPrefs::default());
    }
}

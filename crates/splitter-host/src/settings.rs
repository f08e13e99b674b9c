// Settings persistence: container configuration (divider thickness, chrome colors).
// Uses platform-native config dir: e.g. ~/Library/Application Support/splitter/settings.json
// on macOS, ~/.config/splitter/settings.json on Linux. Panel layout itself is never stored.

use serde::{Deserialize, Serialize};
use splitter_core::Color;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::theme::{DEFAULT_DIVIDER_THICKNESS, DEFAULT_TRANSITION_MS, DIVIDER_COLOR, INDICATOR_COLOR};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Divider thickness in pixels, shared by every nested group.
    #[serde(default = "default_divider_thickness")]
    pub divider_thickness: f32,
    /// Transition hint attached to every placed panel.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    #[serde(default)]
    pub colors: ChromeColors,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            divider_thickness: DEFAULT_DIVIDER_THICKNESS,
            transition_ms: DEFAULT_TRANSITION_MS,
            colors: ChromeColors::default(),
        }
    }
}

impl Settings {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChromeColors {
    #[serde(default = "default_divider_color")]
    pub divider: Color,
    #[serde(default = "default_indicator_color")]
    pub indicator: Color,
}

impl Default for ChromeColors {
    fn default() -> Self {
        Self {
            divider: DIVIDER_COLOR,
            indicator: INDICATOR_COLOR,
        }
    }
}

fn default_divider_thickness() -> f32 {
    DEFAULT_DIVIDER_THICKNESS
}

fn default_transition_ms() -> u64 {
    DEFAULT_TRANSITION_MS
}

fn default_divider_color() -> Color {
    DIVIDER_COLOR
}

fn default_indicator_color() -> Color {
    INDICATOR_COLOR
}

/// Where the embedding application keeps its settings file. `None` when the
/// platform has no config dir.
pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("splitter").join("settings.json"))
}

/// Read settings from `path`. Missing or unparsable files give the defaults.
pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

pub fn save_settings_to(path: &Path, settings: &Settings) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}

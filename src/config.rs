//! Design configuration persistence.
//!
//! Stores visual preferences (bubble colors, typography, device frame) as JSON
//! at `~/.local/share/convo-sim/config.json`. Loaded once on startup; saved on
//! every change so the file is always current.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default config file path.
fn default_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("convo-sim")
        .join("config.json")
}

/// Which device frame surrounds the rendered conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FrameType {
    #[default]
    Mobile,
    None,
}

/// Persisted design settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignConfig {
    #[serde(default = "default_party1_color")]
    pub party1_color: String,
    #[serde(default = "default_party2_color")]
    pub party2_color: String,
    #[serde(default = "default_background_color")]
    pub background_color: String,
    /// Whether playback synthesizes a typing phase before each reveal.
    #[serde(default = "default_true")]
    pub show_typing: bool,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_aspect_ratio")]
    pub aspect_ratio: String,
    #[serde(default = "default_carrier_name")]
    pub carrier_name: String,
    #[serde(default)]
    pub frame_type: FrameType,
    /// Path the config was loaded from (not serialized).
    #[serde(skip)]
    path: PathBuf,
}

fn default_party1_color() -> String { "#007AFF".into() }
fn default_party2_color() -> String { "#E5E5EA".into() }
fn default_background_color() -> String { "#FFFFFF".into() }
fn default_true() -> bool { true }
fn default_font_size() -> u32 { 16 }
fn default_font_family() -> String { "system-ui".into() }
fn default_aspect_ratio() -> String { "9:16".into() }
fn default_carrier_name() -> String { "Carrier".into() }

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            party1_color: default_party1_color(),
            party2_color: default_party2_color(),
            background_color: default_background_color(),
            show_typing: true,
            font_size: default_font_size(),
            font_family: default_font_family(),
            aspect_ratio: default_aspect_ratio(),
            carrier_name: default_carrier_name(),
            frame_type: FrameType::default(),
            path: default_path(),
        }
    }
}

impl DesignConfig {
    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        Self::load_from(default_path())
    }

    /// Load from `path`, falling back to defaults on any error. `save` writes
    /// back to the same path.
    pub fn load_from(path: PathBuf) -> Self {
        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        };
        config.path = path;
        config
    }

    /// Persist current config to disk.
    pub fn save(&self) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(json) = serde_json::to_string_pretty(self) {
            let _ = std::fs::write(&self.path, json);
        }
    }
}

//! Application configuration (window, input, relay backend). Loaded
//! from config.ron at startup. The API key is NOT part of this file;
//! it comes from the environment only.

use relay::RelayConfig;
use serde::{Deserialize, Serialize};

/// Persistent settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window width in logical pixels.
    #[serde(default = "default_window_width")]
    pub window_width: u32,
    /// Window height in logical pixels.
    #[serde(default = "default_window_height")]
    pub window_height: u32,
    /// Enable vsync (recommended to avoid tearing).
    #[serde(default = "default_true")]
    pub vsync: bool,
    /// Start in fullscreen.
    #[serde(default)]
    pub fullscreen: bool,
    /// Mouse sensitivity multiplier (1.0 = default).
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Ship computer backend settings.
    #[serde(default)]
    pub relay: RelayConfig,
}

fn default_window_width() -> u32 {
    1280
}
fn default_window_height() -> u32 {
    720
}
fn default_true() -> bool {
    true
}
fn default_sensitivity() -> f32 {
    1.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            vsync: default_true(),
            fullscreen: false,
            sensitivity: default_sensitivity(),
            relay: RelayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from `config.ron`. A missing file is created with
    /// defaults; an invalid file is left alone and defaults are used.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(data) => match ron::from_str(&data) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                let config = Self::default();
                config.save_to(&path);
                config
            }
        }
    }

    /// Write this config out. Logs on error.
    fn save_to(&self, path: &std::path::Path) {
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }
}

fn config_path() -> std::path::PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_ron() {
        let config = AppConfig::default();
        let text = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default()).unwrap();
        let back: AppConfig = ron::from_str(&text).unwrap();
        assert_eq!(back.window_width, config.window_width);
        assert_eq!(back.relay.model, config.relay.model);
    }

    #[test]
    fn save_to_writes_loadable_file() {
        let path = std::env::temp_dir().join(format!("cockpit-config-{}.ron", std::process::id()));
        let mut config = AppConfig::default();
        config.vsync = false;
        config.sensitivity = 1.5;
        config.save_to(&path);

        let data = std::fs::read_to_string(&path).unwrap();
        let back: AppConfig = ron::from_str(&data).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(!back.vsync);
        assert_eq!(back.sensitivity, 1.5);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let partial: AppConfig = ron::from_str("(vsync: false)").unwrap();
        assert!(!partial.vsync);
        assert_eq!(partial.window_width, 1280);
        assert_eq!(partial.relay.max_output_tokens, 300);
    }
}

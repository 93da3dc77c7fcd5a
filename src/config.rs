//! Configuration persistence for rectask settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::answer::request::MAX_SELECTED_CHARS;
use crate::extract::MIN_SELECTION_PX;
use crate::gesture::{GestureConfig, LONG_PRESS, MOVE_CANCEL_PX};

/// Environment variable that overrides the stored API key
pub const API_KEY_ENV: &str = "RECTASK_API_KEY";

/// Gesture tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Hold time in milliseconds before a press becomes a selection
    pub long_press_ms: u64,
    /// Movement in pixels that cancels a pending press
    pub move_cancel_px: f32,
    /// Selections smaller than this in either direction extract nothing
    pub min_selection_px: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            long_press_ms: LONG_PRESS.as_millis() as u64,
            move_cancel_px: MOVE_CANCEL_PX,
            min_selection_px: MIN_SELECTION_PX,
        }
    }
}

impl GestureSettings {
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            long_press: Duration::from_millis(self.long_press_ms),
            move_cancel_px: self.move_cancel_px,
        }
    }
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend model identifier
    pub model: String,
    /// Output length cap sent with each request
    pub max_output_tokens: u32,
    /// Responses endpoint
    pub endpoint: String,
    /// API key; `RECTASK_API_KEY` takes precedence when set
    pub api_key: Option<String>,
    pub connect_timeout_secs: u64,
    /// Upper bound for the whole request
    pub read_timeout_secs: u64,
    /// How long an answer stays on screen
    pub answer_hide_ms: u64,
    /// Selected text beyond this many characters is not sent
    pub max_selected_chars: usize,
    pub gesture: GestureSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gpt-5.2".to_string(),
            max_output_tokens: 160,
            endpoint: "https://api.openai.com/v1/responses".to_string(),
            api_key: None,
            connect_timeout_secs: 20,
            read_timeout_secs: 25,
            answer_hide_ms: 2200,
            max_selected_chars: MAX_SELECTED_CHARS,
            gesture: GestureSettings::default(),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/rectask/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rectask").join("config.json"))
    }

    /// Load configuration from the default location, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log::warn!("No config directory available, using defaults");
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|err| {
            log::warn!("Error loading config, using defaults: {err:#}");
            Self::default()
        })
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Save configuration to the default location
    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            log::error!("No config directory available, not saving");
            return;
        };
        if let Err(err) = self.save_to(&path) {
            log::error!("Failed to save config: {err:#}");
        }
    }

    /// Credential to use, if any is configured
    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    /// A non-blank `override_key` wins over the stored key
    pub fn resolve_api_key(&self, override_key: Option<String>) -> Option<String> {
        let usable = |key: String| Some(key.trim().to_string()).filter(|key| !key.is_empty());
        override_key
            .and_then(usable)
            .or_else(|| self.api_key.clone().and_then(usable))
    }

    pub fn answer_hide(&self) -> Duration {
        Duration::from_millis(self.answer_hide_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_output_tokens, 160);
        assert_eq!(config.max_selected_chars, 12_000);
        assert_eq!(config.gesture.long_press_ms, 220);
        assert_eq!(config.gesture.move_cancel_px, 14.0);
        assert_eq!(config.gesture.min_selection_px, 8.0);
        assert_eq!(config.answer_hide(), Duration::from_millis(2200));
        assert_eq!(config.gesture.gesture_config(), GestureConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_key: Some("sk-abc".into()),
            model: "other-model".into(),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"model": "m", "gesture": {"long_press_ms": 500}}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model, "m");
        assert_eq!(config.gesture.long_press_ms, 500);
        assert_eq!(config.gesture.move_cancel_px, 14.0);
        assert_eq!(config.endpoint, Config::default().endpoint);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
        assert!(Config::load_from(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_blank_stored_key_is_missing() {
        let config = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        assert_eq!(config.resolve_api_key(None), None);
        assert_eq!(Config::default().resolve_api_key(None), None);

        let config = Config {
            api_key: Some(" sk-1 ".into()),
            ..Config::default()
        };
        assert_eq!(config.resolve_api_key(None).as_deref(), Some("sk-1"));
    }

    #[test]
    fn test_override_key_precedence() {
        let config = Config {
            api_key: Some("stored".into()),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_api_key(Some(" from-env ".into())).as_deref(),
            Some("from-env")
        );
        // A blank override does not mask the stored key
        assert_eq!(
            config.resolve_api_key(Some("  ".into())).as_deref(),
            Some("stored")
        );
    }
}

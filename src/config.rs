//! Game settings read from `config.json`
//!
//! Every field is optional in the file. Command-line flags override the
//! values loaded here.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dialog::TEXT_SPEED;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config '{path}': {source}")]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Could not parse config '{path}': {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub asset_dir: Option<PathBuf>,
    /// Overrides the platform save directory
    #[serde(default)]
    pub save_dir: Option<PathBuf>,
    /// Window size as a multiple of the 400x240 logical size
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Seconds per revealed dialog character
    #[serde(default = "default_text_speed")]
    pub text_speed: f32,
    #[serde(default = "default_autosave_minutes")]
    pub autosave_minutes: u64,
    #[serde(default = "default_vsync")]
    pub vsync: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_scale() -> u32 {
    2
}

fn default_text_speed() -> f32 {
    TEXT_SPEED
}

fn default_autosave_minutes() -> u64 {
    5
}

fn default_vsync() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            asset_dir: None,
            save_dir: None,
            scale: default_scale(),
            text_speed: default_text_speed(),
            autosave_minutes: default_autosave_minutes(),
            vsync: default_vsync(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Reads a config file; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Io { path: path.to_path_buf(), source }),
        };
        let config = Self::from_json(&text).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path: path.to_path_buf(), source },
            other => other,
        })?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(text).map_err(|source| ConfigError::Parse { path: PathBuf::new(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=8).contains(&self.scale) {
            return Err(ConfigError::Invalid(format!("scale must be 1-8, got {}", self.scale)));
        }
        if !(self.text_speed >= 0.0 && self.text_speed <= 1.0) {
            return Err(ConfigError::Invalid(format!("text_speed must be 0-1, got {}", self.text_speed)));
        }
        Ok(())
    }

    /// Zero disables autosaving
    pub fn autosave_interval(&self) -> Option<Duration> {
        (self.autosave_minutes > 0).then(|| Duration::from_secs(self.autosave_minutes * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = GameConfig::from_json(r#"{"scale": 3}"#).unwrap();
        assert_eq!(config.scale, 3);
        assert_eq!(config.text_speed, TEXT_SPEED);
        assert_eq!(config.autosave_interval(), Some(Duration::from_secs(300)));
        assert!(config.vsync);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = GameConfig::from_json(include_str!("../assets/config.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(GameConfig::from_json(r#"{"scale": 0}"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(GameConfig::from_json(r#"{"text_speed": -1.0}"#), Err(ConfigError::Invalid(_))));
        assert!(matches!(GameConfig::from_json("{scale"), Err(ConfigError::Parse { .. })));
        assert_eq!(GameConfig::from_json(r#"{"autosave_minutes": 0}"#).unwrap().autosave_interval(), None);
    }

    #[test]
    fn test_missing_file_is_default() {
        let config = GameConfig::load(Path::new("/nonexistent/unlucky/config.json")).unwrap();
        assert_eq!(config, GameConfig::default());
    }
}

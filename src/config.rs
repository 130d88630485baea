//! Application configuration
//!
//! Loads the optional TOML configuration file from the platform config
//! directory. A default file is written on first run. Loading is
//! fail-safe: a missing, partial or corrupt file degrades to defaults
//! with a warning rather than preventing startup, so the tool keeps the
//! classic behavior (Enter every three seconds) with no file at all.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::emitter::EmitterSettings;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Injection backend configuration
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct InjectionConfig {
    /// Log presses instead of injecting them
    pub dry_run: bool,
}

/// Top-level configuration file contents
///
/// Every field is defaulted so partial files load cleanly:
///
/// ```toml
/// [emitter]
/// interval_ms = 3000
/// initial_delay_ms = 0
/// key = "enter"
///
/// [injection]
/// dry_run = false
/// ```
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Interval, initial delay and key for the press loop
    pub emitter: EmitterSettings,

    /// Backend selection overrides
    pub injection: InjectionConfig,
}

impl AppConfig {
    /// Parses and validates configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Writes this configuration to a file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.emitter
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }

    /// Loads the user configuration, falling back to defaults on any error
    ///
    /// Writes a default config file on first run so users have a template
    /// to edit.
    pub fn load_or_default() -> Self {
        let Some(path) = default_config_path() else {
            warn!("No config directory available, using default configuration");
            return Self::default();
        };

        if !path.exists() {
            let default = Self::default();
            match default.save(&path) {
                Ok(()) => info!("Wrote default configuration to {}", path.display()),
                Err(e) => warn!("Unable to write default configuration: {}", e),
            }
            return default;
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Unable to load {}, falling back to defaults: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Platform config file location, e.g. `~/.config/autokey/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("autokey").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injection::KeyCode;

    #[test]
    fn parses_full_config() {
        let content = r#"
[emitter]
interval_ms = 500
initial_delay_ms = 2000
key = "space"

[injection]
dry_run = true
"#;
        let config = AppConfig::from_toml_str(content).unwrap();
        assert_eq!(config.emitter.interval_ms, 500);
        assert_eq!(config.emitter.initial_delay_ms, 2000);
        assert_eq!(config.emitter.key, KeyCode::Space);
        assert!(config.injection.dry_run);
    }

    #[test]
    fn empty_config_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.emitter.interval_ms, 3000);
        assert_eq!(config.emitter.key, KeyCode::Enter);
        assert!(!config.injection.dry_run);
    }

    #[test]
    fn partial_emitter_table_keeps_other_defaults() {
        let config = AppConfig::from_toml_str("[emitter]\ninterval_ms = 10000\n").unwrap();
        assert_eq!(config.emitter.interval_ms, 10000);
        assert_eq!(config.emitter.key, KeyCode::Enter);
        assert_eq!(config.emitter.initial_delay_ms, 0);
    }

    #[test]
    fn unknown_key_name_is_rejected() {
        let result = AppConfig::from_toml_str("[emitter]\nkey = \"hyperspace\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn sub_floor_interval_is_rejected() {
        let result = AppConfig::from_toml_str("[emitter]\ninterval_ms = 5\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.emitter.interval_ms = 750;
        config.emitter.key = KeyCode::F5;
        config.injection.dry_run = true;

        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        assert_eq!(loaded.emitter.interval_ms, 750);
        assert_eq!(loaded.emitter.key, KeyCode::F5);
        assert!(loaded.injection.dry_run);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}

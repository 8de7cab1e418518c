//! Configuration handling
//!
//! Settings are read from `~/.config/contact-list/config.toml` (global) and
//! then from `contacts.toml` in the working directory (local). Local keys
//! override global ones; command-line flags override both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::csv::DEFAULT_FILE;
use crate::domain::Retry;

/// Name of the per-directory config file
pub const LOCAL_CONFIG: &str = "contacts.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// One configuration layer as written on disk; absent keys inherit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Path of the contact file
    pub file: Option<PathBuf>,

    /// Rejected answers allowed per field before giving up
    pub max_attempts: Option<u32>,

    /// Clear the screen before each menu
    pub clear_screen: Option<bool>,

    /// Wait for Enter after each action
    pub pause: Option<bool>,
}

impl ConfigFile {
    /// Parses a layer from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let layer: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if layer.max_attempts == Some(0) {
            return Err(ConfigError::Invalid("max_attempts must be at least 1".into()).into());
        }

        Ok(layer)
    }

    /// Reads a layer from disk; a missing file is an empty layer
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// Effective configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub file: PathBuf,
    pub max_attempts: Option<u32>,
    pub clear_screen: bool,
    pub pause: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_FILE),
            max_attempts: None,
            clear_screen: true,
            pause: true,
        }
    }
}

impl Config {
    /// Loads configuration from the global and local locations
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = Self::global_config_dir() {
            config.apply(ConfigFile::read(&dir.join("config.toml"))?);
        }
        config.apply(ConfigFile::read(Path::new(LOCAL_CONFIG))?);

        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "contact-list", "contact-list")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Overlays the keys a layer sets
    pub fn apply(&mut self, layer: ConfigFile) {
        if let Some(file) = layer.file {
            self.file = file;
        }
        if layer.max_attempts.is_some() {
            self.max_attempts = layer.max_attempts;
        }
        if let Some(clear) = layer.clear_screen {
            self.clear_screen = clear;
        }
        if let Some(pause) = layer.pause {
            self.pause = pause;
        }
    }

    /// Retry policy for interactive prompts
    pub fn retry(&self) -> Retry {
        Retry::from_limit(self.max_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.file, PathBuf::from("contacts.csv"));
        assert_eq!(config.retry(), Retry::Unbounded);
        assert!(config.clear_screen);
        assert!(config.pause);
    }

    #[test]
    fn parse_layer() {
        let toml = r#"
file = "people.csv"
max_attempts = 3
pause = false
"#;

        let layer = ConfigFile::parse(toml).unwrap();
        assert_eq!(layer.file, Some(PathBuf::from("people.csv")));
        assert_eq!(layer.max_attempts, Some(3));
        assert_eq!(layer.clear_screen, None);
        assert_eq!(layer.pause, Some(false));
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert!(ConfigFile::parse("colour = \"red\"").is_err());
    }

    #[test]
    fn parse_rejects_zero_attempts() {
        assert!(ConfigFile::parse("max_attempts = 0").is_err());
    }

    #[test]
    fn layers_override_in_order() {
        let mut config = Config::default();
        config.apply(ConfigFile {
            file: Some("global.csv".into()),
            clear_screen: Some(false),
            ..ConfigFile::default()
        });
        config.apply(ConfigFile {
            file: Some("local.csv".into()),
            max_attempts: Some(5),
            ..ConfigFile::default()
        });

        assert_eq!(config.file, PathBuf::from("local.csv"));
        assert_eq!(config.retry(), Retry::AtMost(5));
        assert!(!config.clear_screen);
        assert!(config.pause);
    }

    #[test]
    fn read_missing_file_is_empty_layer() {
        let dir = TempDir::new().unwrap();
        let layer = ConfigFile::read(&dir.path().join("contacts.toml")).unwrap();
        assert_eq!(layer, ConfigFile::default());
    }

    #[test]
    fn read_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.toml");
        fs::write(&path, "clear_screen = false\n").unwrap();

        let layer = ConfigFile::read(&path).unwrap();
        assert_eq!(layer.clear_screen, Some(false));
    }

    #[test]
    fn read_reports_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contacts.toml");
        fs::write(&path, "max_attempts = \"many\"\n").unwrap();

        let err = ConfigFile::read(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config"));
    }
}

//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scenario::{Tracking, HARD_MATCHUP_LIMIT};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Scenario engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Largest schedule the engine will enumerate (2^n permutations)
    #[serde(default = "default_max_matchups")]
    pub max_matchups: usize,

    /// Fan permutation evaluation out over the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Skip matchups between two already clinched/eliminated teams
    #[serde(default = "default_filter_locked")]
    pub filter_locked_matchups: bool,

    /// Also bucket teams that are already clinched or eliminated
    #[serde(default)]
    pub track_decided_teams: bool,
}

fn default_max_matchups() -> usize {
    20
}

fn default_parallel() -> bool {
    true
}

fn default_filter_locked() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_matchups: default_max_matchups(),
            parallel: default_parallel(),
            filter_locked_matchups: default_filter_locked(),
            track_decided_teams: false,
        }
    }
}

impl EngineConfig {
    pub fn tracking(&self) -> Tracking {
        if self.track_decided_teams {
            Tracking::All
        } else {
            Tracking::Undecided
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.max_matchups == 0 || self.engine.max_matchups > HARD_MATCHUP_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "engine.max_matchups must be between 1 and {}",
                HARD_MATCHUP_LIMIT
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.engine.max_matchups, 20);
        assert!(config.engine.parallel);
        assert!(config.engine.filter_locked_matchups);
        assert_eq!(config.engine.tracking(), Tracking::Undecided);
    }

    #[test]
    fn test_config_validation_ok() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_cap() {
        let mut config = AppConfig::default();
        config.engine.max_matchups = 0;
        assert!(config.validate().is_err());

        config.engine.max_matchups = HARD_MATCHUP_LIMIT + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"

            [engine]
            parallel = false
            track_decided_teams = true
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.engine.max_matchups, 20);
        assert!(!config.engine.parallel);
        assert_eq!(config.engine.tracking(), Tracking::All);
    }

    #[test]
    fn test_from_file_rejects_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("playoffs.toml");
        std::fs::write(&path, "[engine]\nmax_matchups = 64\n").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.engine, parsed.engine);
    }
}

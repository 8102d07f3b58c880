//! Configuration file
//!
//! `<config dir>/recipe-search/config.json`; a missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::search::MAX_SUGGESTIONS;
use crate::text::MIN_QUERY_CHARS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Recipe data file; the bundled dataset is used when unset
    pub recipes_path: Option<PathBuf>,
    pub min_query_chars: usize,
    pub max_suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recipes_path: None,
            min_query_chars: MIN_QUERY_CHARS,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.min_query_chars < MIN_QUERY_CHARS {
            return Err(AppError::ConfigError(format!(
                "min_query_chars must be at least {}",
                MIN_QUERY_CHARS
            )));
        }
        if self.max_suggestions == 0 || self.max_suggestions > MAX_SUGGESTIONS {
            return Err(AppError::ConfigError(format!(
                "max_suggestions must be between 1 and {}",
                MAX_SUGGESTIONS
            )));
        }
        Ok(())
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("recipe-search").join("config.json"))
}

/// Load the configuration from its default location
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Load the configuration from `path`, falling back to defaults if it does not exist
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let data = fs::read_to_string(path).context("Failed to read config file")?;
    let config: Config = serde_json::from_str(&data).context("Failed to parse config file")?;
    config.validate()?;

    Ok(config)
}

/// Save the configuration to `path`, creating parent directories
pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let data = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, data).context("Failed to write config file")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.max_suggestions, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            recipes_path: Some(PathBuf::from("/tmp/recipes.json")),
            min_query_chars: 4,
            max_suggestions: 5,
        };

        save_config_to(&path, &config).unwrap();
        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"max_suggestions": 4}"#).unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.max_suggestions, 4);
        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.recipes_path, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"min_query_chars": 0}"#).unwrap();

        let err = load_config_from(&path).unwrap_err();
        let app: AppError = err.into();
        assert_eq!(app.error_code(), "config_error");
    }

    #[test]
    fn test_limits_cannot_be_loosened() {
        for (min_query_chars, max_suggestions) in [(1, 10), (2, 10), (3, 11), (3, 50), (1, 50)] {
            let config = Config {
                recipes_path: None,
                min_query_chars,
                max_suggestions,
            };
            let err = config.validate().unwrap_err();
            assert_eq!(err.error_code(), "config_error", "accepted {:?}", config);
        }

        let stricter = Config {
            recipes_path: None,
            min_query_chars: 5,
            max_suggestions: 1,
        };
        assert!(stricter.validate().is_ok());
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}

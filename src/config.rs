//! Configuration loading.
//!
//! Home directory resolution order:
//! 1. ZCALC_HOME environment variable (if set)
//! 2. ~/.config/zcalc (default)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::calculator::{Calculator, DEFAULT_ERROR_TOKEN, DEFAULT_HISTORY_CAPACITY, History};

/// Returns the zcalc home directory.
pub fn zcalc_home() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("ZCALC_HOME") {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|h| h.join(".config").join("zcalc"))
        .context("Could not determine home directory")
}

/// Returns the path to the config.toml file.
pub fn config_path() -> Result<PathBuf> {
    Ok(zcalc_home()?.join("config.toml"))
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Number of history entries kept before the oldest is dropped.
    pub history_capacity: usize,

    /// Text shown on the display after a division by zero.
    pub error_token: String,

    /// Copy every result produced by `=` to the clipboard.
    pub copy_results: bool,
}

impl Config {
    /// Loads configuration from the default path.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history_capacity == 0 {
            anyhow::bail!("history_capacity must be at least 1");
        }
        Ok(())
    }

    /// Build a calculator with this configuration.
    pub fn calculator(&self) -> Calculator {
        Calculator::new(
            History::with_capacity(self.history_capacity),
            self.error_token.clone(),
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            error_token: DEFAULT_ERROR_TOKEN.to_string(),
            copy_results: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "history_capacity = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.history_capacity, 5);
        assert_eq!(config.error_token, DEFAULT_ERROR_TOKEN);
        assert!(!config.copy_results);
        assert_eq!(config.calculator().history().capacity(), 5);
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "history_capacity = 10\nerror_token = \"Cannot divide by zero\"\ncopy_results = true\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.error_token, "Cannot divide by zero");
        assert!(config.copy_results);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "history_capacity = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "history_capacity = \"many\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }
}

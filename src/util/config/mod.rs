//! Configuration for the coroutines CLI
//!
//! # Configuration hierarchy
//!
//! ```text
//! Priority (high → low):
//! 1. CLI arguments
//! 2. Environment variables (COROUTINES_LOG_LEVEL, COROUTINES_LOG_FILE)
//! 3. Explicit config file (--config)
//! 4. User-level (~/.config/coroutines/config.toml)
//! 5. Default values
//! ```
//!
//! # Usage
//!
//! ```rust
//! use coroutines::util::config::parse_config;
//!
//! let config = parse_config("[log]\nlevel = \"debug\"\n").unwrap();
//! assert!(config.log.stdout);
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::util::logger::LogLevel;

/// Environment variable overriding [`LogConfig::level`].
pub const ENV_LOG_LEVEL: &str = "COROUTINES_LOG_LEVEL";
/// Environment variable overriding [`LogConfig::file`].
pub const ENV_LOG_FILE: &str = "COROUTINES_LOG_FILE";

/// Configuration for the self-test runner
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AutotestConfig {
    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum level that gets written
    #[serde(default)]
    pub level: LogLevel,
    /// Write to stdout
    #[serde(default = "default_stdout")]
    pub stdout: bool,
    /// Also append to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_stdout() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            stdout: true,
            file: None,
        }
    }
}

impl AutotestConfig {
    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn apply_env_from<F>(
        &mut self,
        lookup: F,
    ) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log.level = level
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_LOG_LEVEL,
                    value: level,
                })?;
        }
        if let Some(file) = lookup(ENV_LOG_FILE) {
            self.log.file = (!file.is_empty()).then(|| PathBuf::from(file));
        }
        Ok(())
    }
}

/// Get the user config directory
pub fn get_config_dir() -> Option<PathBuf> {
    // Try XDG config directory on Unix
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config).join("coroutines"));
    }

    // Fallback to ~/.config/coroutines
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home).join(".config").join("coroutines"));
    }

    // On Windows, try %APPDATA%
    if let Ok(appdata) = std::env::var("APPDATA") {
        return Some(PathBuf::from(appdata).join("coroutines"));
    }

    None
}

/// Get the user config file path (~/.config/coroutines/config.toml)
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join("config.toml"))
}

/// Parse configuration from TOML text
pub fn parse_config(content: &str) -> Result<AutotestConfig, ConfigError> {
    toml::from_str(content).map_err(ConfigError::ParseError)
}

/// Load configuration from an explicit file
pub fn load_config(path: &Path) -> Result<AutotestConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::IoError)?;
    parse_config(&content)
}

/// Load user-level configuration
/// Returns default config if file doesn't exist
pub fn load_user_config() -> Result<AutotestConfig, ConfigError> {
    let path = match get_config_path() {
        Some(p) => p,
        None => return Ok(AutotestConfig::default()),
    };

    if !path.exists() {
        return Ok(AutotestConfig::default());
    }

    load_config(&path)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Config parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

#[cfg(test)]
mod tests;

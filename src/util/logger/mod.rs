//! Logger module for coroutines
//!
//! Go-style simple logging: `[LEVEL] message`, to stdout, a file, or both.
//!
//! # Usage
//!
//! ```rust
//! use coroutines::util::logger;
//!
//! logger::init();
//! tracing::info!("Hello, {}", "world");
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::util::config::LogConfig;

/// Log level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Logger setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("cannot open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// Initialize logger with default configuration (INFO level)
pub fn init() {
    init_with_level(LogLevel::Info);
}

/// Initialize logger with custom level (Go style: `[LEVEL] message`)
///
/// Does nothing if a global logger is already installed.
pub fn init_with_level(level: LogLevel) {
    let config = LogConfig {
        level,
        ..LogConfig::default()
    };
    if let Err(err) = tolerate_reinit(init_with_config(&config)) {
        eprintln!("logger: {err}");
    }
}

/// Treat an already-installed global logger as success; keep every other error.
fn tolerate_reinit(result: Result<(), LoggerError>) -> Result<(), LoggerError> {
    match result {
        Err(LoggerError::AlreadyInitialized) => Ok(()),
        other => other,
    }
}

/// Initialize logger for debug use (DEBUG level)
pub fn init_debug() {
    init_with_level(LogLevel::Debug);
}

/// Initialize logger from a [`LogConfig`]
///
/// Stdout output has no timestamps; file output keeps them.
pub fn init_with_config(config: &LogConfig) -> Result<(), LoggerError> {
    let filter = LevelFilter::from_level(config.level.into());

    // Go 风格：显示 [LEVEL] 前缀，不显示时间、不显示模块路径、无颜色
    let stdout_layer = config.stdout.then(|| {
        tracing_subscriber::fmt::layer()
            .without_time()
            .with_target(false)
            .with_level(true)
            .with_ansi(false)
            .compact()
    });

    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggerError::OpenFile {
                    path: path.clone(),
                    source,
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    Registry::default()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

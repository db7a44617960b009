//! File-backed logging. The terminal is in raw mode while the game runs, so
//! log records go to a file instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;

use log::LevelFilter;

use crate::error::{ConfigError, LogError};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// File the log is appended to
    pub file: PathBuf,
    /// Default level filter; `RUST_LOG` takes precedence when set
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: PathBuf::from("connect-four.log"),
            level: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.level
            .parse()
            .map_err(|_| ConfigError::Validation(format!("log.level '{}' is not a log level", self.level)))
    }
}

/// Install the global logger, appending to `config.file`.
pub fn init(config: &LogConfig) -> Result<(), LogError> {
    let level = config.level_filter().unwrap_or(LevelFilter::Info);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|source| LogError::OpenFile {
            path: config.file.clone(),
            source,
        })?;

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;

    log::debug!("logging to {} at {level}", config.file.display());
    Ok(())
}

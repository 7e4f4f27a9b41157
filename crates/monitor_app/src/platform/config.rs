//! RON configuration file for the dashboard.
//!
//! A missing file is not an error: the defaults apply. Every field may be
//! omitted from the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use monitor_core::{
    endpoint_for_path, ChannelSettings, EndpointError, DEFAULT_HEARTBEAT_INTERVAL,
    DEFAULT_MAX_RECONNECT_ATTEMPTS, DEFAULT_RECONNECT_BASE_DELAY, PROGRESS_PATH,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "monitor.ron";
const DEFAULT_ORIGIN: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to write config {path:?}: {message}")]
    Write { path: PathBuf, message: String },
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("`{field}` must be greater than zero")]
    ZeroValue { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub origin: String,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub channel: ChannelConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub path: String,
    pub heartbeat_interval_ms: u64,
    pub reconnect_base_delay_ms: u64,
    pub max_reconnect_attempts: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            // The dashboard owns the terminal, so logs go to a file by default.
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            channel: ChannelConfig::default(),
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            path: PROGRESS_PATH.to_string(),
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL.as_millis() as u64,
            reconnect_base_delay_ms: DEFAULT_RECONNECT_BASE_DELAY.as_millis() as u64,
            max_reconnect_attempts: DEFAULT_MAX_RECONNECT_ATTEMPTS,
        }
    }
}

impl MonitorConfig {
    pub fn log_level(&self) -> LevelFilter {
        monitor_logging::parse_level(Some(&self.log_level), LevelFilter::Info)
    }

    pub fn channel_settings(&self) -> Result<ChannelSettings, ConfigError> {
        if self.channel.heartbeat_interval_ms == 0 {
            return Err(ConfigError::ZeroValue {
                field: "heartbeat_interval_ms",
            });
        }
        let endpoint = endpoint_for_path(&self.origin, &self.channel.path)?;
        let mut settings = ChannelSettings::new(endpoint);
        settings.heartbeat_interval = Duration::from_millis(self.channel.heartbeat_interval_ms);
        settings.reconnect_base_delay =
            Duration::from_millis(self.channel.reconnect_base_delay_ms);
        settings.max_reconnect_attempts = self.channel.max_reconnect_attempts;
        Ok(settings)
    }
}

pub(crate) fn read_config(path: &Path) -> Result<MonitorConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(MonitorConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

pub(crate) fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&MonitorConfig::default(), pretty).map_err(|err| {
        ConfigError::Write {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    })?;
    fs::write(path, content).map_err(|err| ConfigError::Write {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

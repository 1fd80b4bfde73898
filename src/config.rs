//! Configuration module for PDFRooms.

use serde::Deserialize;
use std::path::Path;

use crate::{PdfRoomsError, Result};

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON store file (file-backed storage only).
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    "data/pdfrooms.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Chat timing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Polling interval for mounted chat sessions, in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Freshness window for typing signals, in milliseconds.
    #[serde(default = "default_typing_ttl")]
    pub typing_ttl_ms: i64,
    /// Idle time after the last keystroke before the typing signal is
    /// cleared, in milliseconds.
    #[serde(default = "default_typing_idle")]
    pub typing_idle_ms: i64,
    /// Largest unread count shown verbatim; anything above displays as
    /// "{cap}+".
    #[serde(default = "default_unread_cap")]
    pub unread_display_cap: usize,
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_typing_ttl() -> i64 {
    3000
}

fn default_typing_idle() -> i64 {
    2000
}

fn default_unread_cap() -> usize {
    99
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            typing_ttl_ms: default_typing_ttl(),
            typing_idle_ms: default_typing_idle(),
            unread_display_cap: default_unread_cap(),
        }
    }
}

/// Display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Timezone for displaying timestamps (e.g., "Asia/Tokyo", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "data/pdfrooms.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Chat timing settings.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| PdfRoomsError::Config(e.to_string()))
    }
}

//! Configuration module for PitchDesk.

use serde::Deserialize;
use std::path::Path;

use crate::{PitchdeskError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/pitchdesk.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
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
    "logs/pitchdesk.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Messaging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagingConfig {
    /// Maximum number of messages returned by inbox/sent listings.
    #[serde(default = "default_inbox_limit")]
    pub inbox_limit: i64,
    /// Maximum number of messages returned by a search.
    #[serde(default = "default_search_limit")]
    pub search_limit: i64,
    /// Maximum number of notifications returned by the feed.
    #[serde(default = "default_notification_feed_limit")]
    pub notification_feed_limit: i64,
}

fn default_inbox_limit() -> i64 {
    50
}

fn default_search_limit() -> i64 {
    20
}

fn default_notification_feed_limit() -> i64 {
    10
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            inbox_limit: default_inbox_limit(),
            search_limit: default_search_limit(),
            notification_feed_limit: default_notification_feed_limit(),
        }
    }
}

/// Web API configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct WebConfig {
    /// Allowed CORS origins. Empty means same-origin only.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Messaging configuration.
    #[serde(default)]
    pub messaging: MessagingConfig,
    /// Web API configuration.
    #[serde(default)]
    pub web: WebConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PitchdeskError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| PitchdeskError::Config(format!("config parse error: {e}")))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.messaging.inbox_limit <= 0 {
            return Err(PitchdeskError::Config(
                "messaging.inbox_limit must be positive".to_string(),
            ));
        }
        if self.messaging.search_limit <= 0 {
            return Err(PitchdeskError::Config(
                "messaging.search_limit must be positive".to_string(),
            ));
        }
        if self.messaging.notification_feed_limit <= 0 {
            return Err(PitchdeskError::Config(
                "messaging.notification_feed_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

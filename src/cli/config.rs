//! Configuration file
//!
//! ```json
//! {
//!   "database_url": "sqlite://quizdb.sqlite3",
//!   "max_connections": 5,
//!   "acquire_timeout_secs": 5,
//!   "http": { "host": "0.0.0.0", "port": 8000, "cors_origins": [] }
//! }
//! ```
//!
//! Only `database_url` is required. `QUIZDB_DATABASE_URL` and
//! `QUIZDB_PORT` override the file when set.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

use super::errors::{CliError, CliResult};

/// Environment variable overriding `database_url`
pub const ENV_DATABASE_URL: &str = "QUIZDB_DATABASE_URL";
/// Environment variable overriding `http.port`
pub const ENV_PORT: &str = "QUIZDB_PORT";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite URL (required)
    pub database_url: String,

    /// Pool size (optional, default 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection (optional, default 5)
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://quizdb.sqlite3".to_string(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load, apply environment overrides, and validate
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Replace fields from `lookup` (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database_url = url;
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.parse().map_err(|_| {
                CliError::config_error(format!("Invalid {}: '{}'", ENV_PORT, port))
            })?;
        }

        Ok(())
    }

    /// Reject values the server cannot start with
    pub fn validate(&self) -> CliResult<()> {
        if !self.database_url.starts_with("sqlite:") {
            return Err(CliError::config_error(format!(
                "Invalid database_url: '{}'. Must start with 'sqlite:'.",
                self.database_url
            )));
        }

        if self.max_connections == 0 {
            return Err(CliError::config_error("max_connections must be > 0"));
        }

        if self.acquire_timeout_secs == 0 {
            return Err(CliError::config_error("acquire_timeout_secs must be > 0"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        Ok(())
    }

    /// Pool settings derived from this config
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            database_url: self.database_url.clone(),
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs),
        }
    }

    /// Write this config as pretty JSON
    pub fn write(&self, path: &Path) -> CliResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n")?;
        Ok(())
    }
}

//! API server configuration.
//!
//! Layered with the `config` crate, later sources overriding earlier ones:
//!
//! ```text
//! 1. built-in defaults
//! 2. tally.toml in the working directory (optional)
//! 3. TALLY_* environment variables   (TALLY_PORT=9000, TALLY_DATABASE_PATH=...)
//! ```

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use tally_db::DbConfig;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "TALLY";

/// Default config file name (without extension).
pub const CONFIG_FILE: &str = "tally";

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: String,

    /// Pool size
    pub max_connections: u32,

    /// How long a checkout waits for the write lock
    pub busy_timeout_secs: u64,

    /// `development` or `production`
    pub app_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_path: "tally.db".to_string(),
            max_connections: 5,
            busy_timeout_secs: 5,
            app_env: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from defaults, `tally.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(CONFIG_FILE)
    }

    /// Like [`load`](Self::load) with an explicit config file name.
    pub fn load_from(file: &str) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let settings = Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .set_default("database_path", defaults.database_path)?
            .set_default("max_connections", defaults.max_connections as i64)?
            .set_default("busy_timeout_secs", defaults.busy_timeout_secs as i64)?
            .set_default("app_env", defaults.app_env)?
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }
        Ok(())
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("host".to_string()))
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}

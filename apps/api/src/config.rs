//! Server configuration.
//!
//! ## Load Order
//! ```text
//! defaults ──► meeple.toml (or $MEEPLE_CONFIG) ──► MEEPLE_* env vars
//!   lowest                                           highest
//! ```
//!
//! | Key               | Env var                 | Default      |
//! |-------------------|-------------------------|--------------|
//! | `host`            | `MEEPLE_HOST`           | `0.0.0.0`    |
//! | `port`            | `MEEPLE_PORT`           | `4000`       |
//! | `database_path`   | `MEEPLE_DATABASE_PATH`  | `meeple.db`  |
//! | `max_connections` | `MEEPLE_MAX_CONNECTIONS`| `5`          |

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};
use meeple_db::DbConfig;
use serde::Deserialize;

/// Default config file, read only if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "meeple.toml";

/// API server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    /// SQLite database file
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,
}

impl ServerConfig {
    /// Loads configuration from the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("MEEPLE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&file, Environment::with_prefix("MEEPLE"))
    }

    /// Loads configuration from `file` (optional) and `env`.
    pub fn load_from(file: &str, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 4000)?
            .set_default("database_path", "meeple.db")?
            .set_default("max_connections", 5)?
            .add_source(File::new(file, FileFormat::Toml).required(false))
            .add_source(env)
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue("max_connections".to_string()));
        }

        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("database_path".to_string()));
        }

        Ok(())
    }

    /// `host:port` to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

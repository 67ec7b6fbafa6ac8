//! Server configuration read from environment variables.
//!
//! - `MUSICSHOP_DB_PATH`: SQLite database file path (default: "musicshop.db")
//! - `MUSICSHOP_HOST`: listen address (default: "0.0.0.0")
//! - `MUSICSHOP_PORT`: listen port (default: "3001")

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MUSICSHOP_PORT is not a valid port: '{0}'")]
    InvalidPort(String),
}

pub const DEFAULT_DB_PATH: &str = "musicshop.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: String,
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            db_path: DEFAULT_DB_PATH.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable lookup; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();
        let port = match lookup("MUSICSHOP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
            None => defaults.port,
        };
        Ok(ServerConfig {
            db_path: lookup("MUSICSHOP_DB_PATH").unwrap_or(defaults.db_path),
            host: lookup("MUSICSHOP_HOST").unwrap_or(defaults.host),
            port,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

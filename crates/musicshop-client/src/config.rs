//! Backend selection for [`ShopClient`](crate::ShopClient).
//!
//! - `MUSICSHOP_BACKEND`: `http` (default) or `local`
//! - `MUSICSHOP_API_URL`: API base URL (default: "http://localhost:3001/api")
//! - `MUSICSHOP_LOCAL_DIR`: directory of the local store (default: "musicshop-data")

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MUSICSHOP_BACKEND must be 'http' or 'local', got '{0}'")]
    UnknownBackend(String),
}

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_LOCAL_DIR: &str = "musicshop-data";

/// Which store the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Http { base_url: String },
    Local { dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend: Backend,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::http(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn http(base_url: impl Into<String>) -> Self {
        ClientConfig {
            backend: Backend::Http {
                base_url: base_url.into(),
            },
        }
    }

    pub fn local(dir: impl Into<PathBuf>) -> Self {
        ClientConfig {
            backend: Backend::Local { dir: dir.into() },
        }
    }

    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any variable lookup; unset variables take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let backend = lookup("MUSICSHOP_BACKEND").unwrap_or_else(|| "http".to_string());
        match backend.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ClientConfig::http(
                lookup("MUSICSHOP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            )),
            "local" => Ok(ClientConfig::local(
                lookup("MUSICSHOP_LOCAL_DIR").unwrap_or_else(|| DEFAULT_LOCAL_DIR.to_string()),
            )),
            _ => Err(ConfigError::UnknownBackend(backend)),
        }
    }
}

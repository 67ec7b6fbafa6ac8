//! Application state with a shared `ShopService`.
//!
//! [`AppState`] wraps the service in `Arc<tokio::sync::Mutex<>>` for use with
//! axum handlers. `tokio::sync::Mutex` lets handlers await the lock without
//! blocking the runtime; an `RwLock` is ruled out because `rusqlite::Connection`
//! is `!Sync`.

use std::sync::Arc;

use musicshop_storage::ShopStore;

use crate::error::ApiError;
use crate::service::ShopService;

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// The shared shop service (async Mutex -- non-blocking await).
    pub service: Arc<tokio::sync::Mutex<ShopService>>,
}

impl AppState {
    /// Creates a new `AppState` backed by the SQLite database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        Ok(Self::from_service(ShopService::new(db_path)?))
    }

    /// Creates a new `AppState` with an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, ApiError> {
        Ok(Self::from_service(ShopService::in_memory()?))
    }

    /// Creates a new `AppState` over an arbitrary store.
    pub fn with_store(store: impl ShopStore + Send + 'static) -> Self {
        Self::from_service(ShopService::with_store(store))
    }

    fn from_service(service: ShopService) -> Self {
        AppState {
            service: Arc::new(tokio::sync::Mutex::new(service)),
        }
    }
}

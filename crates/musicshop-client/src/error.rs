//! Errors surfaced by every client backend.

use musicshop_core::CoreError;
use musicshop_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request was rejected as invalid (HTTP 400 or local validation).
    #[error("{0}")]
    Validation(String),

    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The backing store failed.
    #[error("{0}")]
    Store(String),

    /// The HTTP API could not be reached.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The HTTP API answered with a body we could not read.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// True for errors caused by the caller's input rather than the backend.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ClientError::Validation(_) | ClientError::NotFound(_))
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        ClientError::Validation(err.to_string())
    }
}

impl From<StorageError> for ClientError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::Validation(inner) => ClientError::Validation(inner.to_string()),
            StorageError::NotFound { .. } => ClientError::NotFound(err.to_string()),
            _ => ClientError::Store(err.to_string()),
        }
    }
}

//! Response bodies shared by the HTTP API and the client facade.

use serde::{Deserialize, Serialize};

/// Body returned by every delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl DeleteResponse {
    /// `"<Label> deleted successfully"`, e.g. "Record company deleted successfully".
    pub fn deleted(label: &str) -> Self {
        DeleteResponse {
            message: format!("{label} deleted successfully"),
        }
    }
}

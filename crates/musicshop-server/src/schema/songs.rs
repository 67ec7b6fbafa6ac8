//! Song request types.

use serde::Deserialize;

/// Query string for `GET /api/search/songs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Substring to look for. Missing means "match everything".
    #[serde(default)]
    pub term: Option<String>,
}

impl SearchQuery {
    pub fn term(&self) -> &str {
        self.term.as_deref().unwrap_or_default()
    }
}

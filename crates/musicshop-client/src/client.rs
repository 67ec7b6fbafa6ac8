//! The facade UI code talks to. The backend is chosen once, from a
//! [`ClientConfig`], and every failure is logged before it is returned.

use musicshop_core::{
    DeleteResponse, JoinedSong, Party, PartyDraft, PartyKind, RecordId, SongDraft,
};

use crate::backend::ShopBackend;
use crate::config::{Backend, ClientConfig};
use crate::error::ClientError;
use crate::http::HttpBackend;
use crate::local::LocalBackend;

pub enum ShopClient {
    Http(HttpBackend),
    Local(LocalBackend),
}

impl ShopClient {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = match &config.backend {
            Backend::Http { base_url } => ShopClient::Http(HttpBackend::new(base_url.clone())),
            Backend::Local { dir } => ShopClient::Local(LocalBackend::open(dir)?),
        };
        tracing::debug!(backend = client.backend_name(), "shop client ready");
        Ok(client)
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            ShopClient::Http(_) => "http",
            ShopClient::Local(_) => "local",
        }
    }
}

/// Forwards to the active backend and logs a failed result.
macro_rules! dispatch {
    ($self:ident, $op:literal, $method:ident($($arg:expr),*)) => {{
        let result = match $self {
            ShopClient::Http(backend) => backend.$method($($arg),*).await,
            ShopClient::Local(backend) => backend.$method($($arg),*).await,
        };
        if let Err(err) = &result {
            tracing::error!(
                backend = $self.backend_name(),
                operation = $op,
                error = %err,
                "shop operation failed"
            );
        }
        result
    }};
}

impl ShopBackend for ShopClient {
    async fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, ClientError> {
        dispatch!(self, "list_parties", list_parties(kind))
    }

    async fn create_party(
        &self,
        kind: PartyKind,
        draft: &PartyDraft,
    ) -> Result<Party, ClientError> {
        dispatch!(self, "create_party", create_party(kind, draft))
    }

    async fn update_party(
        &self,
        kind: PartyKind,
        id: RecordId,
        draft: &PartyDraft,
    ) -> Result<Party, ClientError> {
        dispatch!(self, "update_party", update_party(kind, id, draft))
    }

    async fn delete_party(
        &self,
        kind: PartyKind,
        id: RecordId,
    ) -> Result<DeleteResponse, ClientError> {
        dispatch!(self, "delete_party", delete_party(kind, id))
    }

    async fn list_songs(&self) -> Result<Vec<JoinedSong>, ClientError> {
        dispatch!(self, "list_songs", list_songs())
    }

    async fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, ClientError> {
        dispatch!(self, "search_songs", search_songs(term))
    }

    async fn create_song(&self, draft: &SongDraft) -> Result<JoinedSong, ClientError> {
        dispatch!(self, "create_song", create_song(draft))
    }

    async fn update_song(
        &self,
        id: RecordId,
        draft: &SongDraft,
    ) -> Result<JoinedSong, ClientError> {
        dispatch!(self, "update_song", update_song(id, draft))
    }

    async fn delete_song(&self, id: RecordId) -> Result<DeleteResponse, ClientError> {
        dispatch!(self, "delete_song", delete_song(id))
    }
}

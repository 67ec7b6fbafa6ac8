//! [`ShopBackend`] over a [`LocalStore`] kept in a directory of JSON files.

use std::path::Path;

use tokio::sync::Mutex;

use musicshop_core::{
    DeleteResponse, JoinedSong, Party, PartyDraft, PartyKind, RecordId, SongDraft,
};
use musicshop_storage::{FileKeyValue, LocalStore, ShopStore};

use crate::backend::ShopBackend;
use crate::error::ClientError;

pub struct LocalBackend {
    store: Mutex<LocalStore>,
}

impl LocalBackend {
    /// Opens the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, ClientError> {
        let kv = FileKeyValue::new(dir)?;
        Ok(Self::with_store(LocalStore::new(kv)))
    }

    pub fn with_store(store: LocalStore) -> Self {
        LocalBackend {
            store: Mutex::new(store),
        }
    }
}

impl ShopBackend for LocalBackend {
    async fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, ClientError> {
        let store = self.store.lock().await;
        Ok(store.list_parties(kind)?)
    }

    async fn create_party(
        &self,
        kind: PartyKind,
        draft: &PartyDraft,
    ) -> Result<Party, ClientError> {
        let fields = draft.clone().into_fields()?;
        let mut store = self.store.lock().await;
        Ok(store.create_party(kind, &fields)?)
    }

    async fn update_party(
        &self,
        kind: PartyKind,
        id: RecordId,
        draft: &PartyDraft,
    ) -> Result<Party, ClientError> {
        let fields = draft.clone().into_fields()?;
        let mut store = self.store.lock().await;
        Ok(store.update_party(kind, id, &fields)?)
    }

    async fn delete_party(
        &self,
        kind: PartyKind,
        id: RecordId,
    ) -> Result<DeleteResponse, ClientError> {
        let mut store = self.store.lock().await;
        store.delete_party(kind, id)?;
        Ok(DeleteResponse::deleted(kind.label()))
    }

    async fn list_songs(&self) -> Result<Vec<JoinedSong>, ClientError> {
        let store = self.store.lock().await;
        Ok(store.list_songs()?)
    }

    async fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, ClientError> {
        let store = self.store.lock().await;
        Ok(store.search_songs(term)?)
    }

    async fn create_song(&self, draft: &SongDraft) -> Result<JoinedSong, ClientError> {
        let fields = draft.clone().into_fields()?;
        let mut store = self.store.lock().await;
        Ok(store.create_song(&fields)?)
    }

    async fn update_song(
        &self,
        id: RecordId,
        draft: &SongDraft,
    ) -> Result<JoinedSong, ClientError> {
        let fields = draft.clone().into_fields()?;
        let mut store = self.store.lock().await;
        Ok(store.update_song(id, &fields)?)
    }

    async fn delete_song(&self, id: RecordId) -> Result<DeleteResponse, ClientError> {
        let mut store = self.store.lock().await;
        store.delete_song(id)?;
        Ok(DeleteResponse::deleted("Song"))
    }
}

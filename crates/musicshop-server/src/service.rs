//! ShopService: the single coordinator between HTTP handlers and storage.
//!
//! Handlers are thin wrappers that delegate here. The service validates
//! drafts into typed fields, calls the store, and logs every mutation.

use musicshop_core::{
    DeleteResponse, JoinedSong, Party, PartyDraft, PartyKind, RecordId, SongDraft,
};
use musicshop_storage::{ShopStore, SqliteStore};

use crate::error::ApiError;

/// Coordinates validation and storage for every API operation.
pub struct ShopService {
    store: Box<dyn ShopStore + Send>,
}

impl ShopService {
    /// Opens (or creates) the SQLite database at `db_path`.
    pub fn new(db_path: &str) -> Result<Self, ApiError> {
        let store = SqliteStore::new(db_path)
            .map_err(|e| ApiError::InternalError(format!("failed to open database: {}", e)))?;
        Ok(Self::with_store(store))
    }

    /// Uses a fresh in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, ApiError> {
        let store = SqliteStore::in_memory()
            .map_err(|e| ApiError::InternalError(format!("failed to open test db: {}", e)))?;
        Ok(Self::with_store(store))
    }

    /// Wraps any backend.
    pub fn with_store(store: impl ShopStore + Send + 'static) -> Self {
        ShopService {
            store: Box::new(store),
        }
    }

    // -------------------------------------------------------------------
    // Parties
    // -------------------------------------------------------------------

    pub fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, ApiError> {
        Ok(self.store.list_parties(kind)?)
    }

    pub fn create_party(&mut self, kind: PartyKind, draft: PartyDraft) -> Result<Party, ApiError> {
        let fields = draft.into_fields()?;
        let party = self.store.create_party(kind, &fields)?;
        tracing::info!(kind = %kind, id = %party.id, "created");
        Ok(party)
    }

    pub fn update_party(
        &mut self,
        kind: PartyKind,
        id: RecordId,
        draft: PartyDraft,
    ) -> Result<Party, ApiError> {
        let fields = draft.into_fields()?;
        let party = self.store.update_party(kind, id, &fields)?;
        tracing::info!(kind = %kind, id = %id, "updated");
        Ok(party)
    }

    pub fn delete_party(
        &mut self,
        kind: PartyKind,
        id: RecordId,
    ) -> Result<DeleteResponse, ApiError> {
        self.store.delete_party(kind, id)?;
        tracing::info!(kind = %kind, id = %id, "deleted");
        Ok(DeleteResponse::deleted(kind.label()))
    }

    // -------------------------------------------------------------------
    // Songs
    // -------------------------------------------------------------------

    pub fn list_songs(&self) -> Result<Vec<JoinedSong>, ApiError> {
        Ok(self.store.list_songs()?)
    }

    pub fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, ApiError> {
        Ok(self.store.search_songs(term)?)
    }

    pub fn create_song(&mut self, draft: SongDraft) -> Result<JoinedSong, ApiError> {
        let fields = draft.into_fields()?;
        let song = self.store.create_song(&fields)?;
        tracing::info!(kind = "Song", id = %song.id(), "created");
        Ok(song)
    }

    pub fn update_song(&mut self, id: RecordId, draft: SongDraft) -> Result<JoinedSong, ApiError> {
        let fields = draft.into_fields()?;
        let song = self.store.update_song(id, &fields)?;
        tracing::info!(kind = "Song", id = %id, "updated");
        Ok(song)
    }

    pub fn delete_song(&mut self, id: RecordId) -> Result<DeleteResponse, ApiError> {
        self.store.delete_song(id)?;
        tracing::info!(kind = "Song", id = %id, "deleted");
        Ok(DeleteResponse::deleted("Song"))
    }
}

//! The operation set every client backend offers.

use musicshop_core::{
    DeleteResponse, JoinedSong, Party, PartyDraft, PartyKind, RecordId, SongDraft,
};

use crate::error::ClientError;

/// Async access to the shop inventory, independent of where it is stored.
///
/// Both implementations return identical shapes: created and updated songs
/// come back joined, deletes come back as a [`DeleteResponse`].
#[allow(async_fn_in_trait)]
pub trait ShopBackend {
    async fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, ClientError>;

    async fn create_party(&self, kind: PartyKind, draft: &PartyDraft)
        -> Result<Party, ClientError>;

    async fn update_party(
        &self,
        kind: PartyKind,
        id: RecordId,
        draft: &PartyDraft,
    ) -> Result<Party, ClientError>;

    async fn delete_party(&self, kind: PartyKind, id: RecordId)
        -> Result<DeleteResponse, ClientError>;

    async fn list_songs(&self) -> Result<Vec<JoinedSong>, ClientError>;

    /// An empty term returns every song.
    async fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, ClientError>;

    async fn create_song(&self, draft: &SongDraft) -> Result<JoinedSong, ClientError>;

    async fn update_song(&self, id: RecordId, draft: &SongDraft)
        -> Result<JoinedSong, ClientError>;

    async fn delete_song(&self, id: RecordId) -> Result<DeleteResponse, ClientError>;
}

//! The [`ShopStore`] trait defining the storage contract for the shop.
//!
//! All backends ([`SqliteStore`](crate::SqliteStore),
//! [`LocalStore`](crate::LocalStore)) implement this trait with identical
//! semantics, so the service and client layers can swap them freely.
//!
//! Contract shared by every backend:
//! - ids are assigned on insert, increase monotonically, and are not reused;
//! - update and delete of a missing id return [`StorageError::NotFound`];
//! - deleting a party never touches songs that reference it;
//! - song reads join parent names at read time, empty when the parent is gone.

use musicshop_core::{JoinedSong, Party, PartyFields, PartyKind, RecordId, SongFields};

use crate::error::StorageError;

/// The storage contract for the music shop.
///
/// The trait is synchronous; the HTTP layer serializes access behind an
/// async mutex.
pub trait ShopStore {
    // -------------------------------------------------------------------
    // Party CRUD (singers, composers, record companies, customers)
    // -------------------------------------------------------------------

    /// Lists every row of `kind` in storage order (ascending id).
    fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, StorageError>;

    /// Inserts a row and returns it with its newly assigned id.
    fn create_party(
        &mut self,
        kind: PartyKind,
        fields: &PartyFields,
    ) -> Result<Party, StorageError>;

    /// Overwrites all non-id fields of an existing row.
    fn update_party(
        &mut self,
        kind: PartyKind,
        id: RecordId,
        fields: &PartyFields,
    ) -> Result<Party, StorageError>;

    /// Removes a row.
    fn delete_party(&mut self, kind: PartyKind, id: RecordId) -> Result<(), StorageError>;

    // -------------------------------------------------------------------
    // Songs
    // -------------------------------------------------------------------

    /// Lists every song joined with its singer, composer and record company names.
    fn list_songs(&self) -> Result<Vec<JoinedSong>, StorageError>;

    /// Lists joined songs whose title, movie, or any joined name contains
    /// `term`, ignoring case. The empty term lists everything.
    fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, StorageError>;

    /// Inserts a song and returns it joined.
    fn create_song(&mut self, fields: &SongFields) -> Result<JoinedSong, StorageError>;

    /// Overwrites all non-id fields of an existing song and returns it joined.
    fn update_song(
        &mut self,
        id: RecordId,
        fields: &SongFields,
    ) -> Result<JoinedSong, StorageError>;

    /// Removes a song.
    fn delete_song(&mut self, id: RecordId) -> Result<(), StorageError>;
}

//! Local fallback implementation of [`ShopStore`].
//!
//! [`LocalStore`] keeps each entity collection as a JSON array under a
//! well-known key in a [`KeyValueStore`]. It has the same observable
//! semantics as the SQLite backend:
//! - ids are `max(existing) + 1`, but never below the per-key high-water mark,
//!   so deleting the newest row does not free its id;
//! - the song join is recomputed on every read from the current parent
//!   collections, nothing derived is stored;
//! - a collection whose JSON cannot be parsed is logged and read as empty,
//!   and writes to it are refused until it is repaired or removed.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use musicshop_core::search::filter_songs;
use musicshop_core::{JoinedSong, Party, PartyFields, PartyKind, RecordId, Song, SongFields};

use crate::error::StorageError;
use crate::kv::KeyValueStore;
use crate::traits::ShopStore;

/// Key of the serialized song collection.
pub const SONGS_KEY: &str = "songs";

const SONG_KIND: &str = "Song";

/// Key-value backed implementation of [`ShopStore`].
pub struct LocalStore {
    kv: Box<dyn KeyValueStore>,
}

impl LocalStore {
    pub fn new(kv: impl KeyValueStore + 'static) -> Self {
        LocalStore { kv: Box::new(kv) }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn parse_collection<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Result<Vec<T>, serde_json::Error>, StorageError> {
        Ok(match self.kv.get(key)? {
            Some(raw) => serde_json::from_str(&raw),
            None => Ok(Vec::new()),
        })
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StorageError> {
        match self.parse_collection(key)? {
            Ok(items) => Ok(items),
            Err(err) => {
                tracing::warn!(key, error = %err, "unreadable local collection, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Loads a collection that is about to be rewritten. Unlike reads, an
    /// unparsable value is an error here: the write would replace it.
    fn read_collection_for_write<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Vec<T>, StorageError> {
        self.parse_collection(key)?
            .map_err(|source| StorageError::CorruptCollection {
                key: key.to_string(),
                source,
            })
    }

    fn write_collection<T: Serialize>(
        &mut self,
        key: &str,
        items: &[T],
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.kv.set(key, &raw)
    }

    /// Allocates the next id for `key` and records it as the new high-water mark.
    fn allocate_id(&mut self, key: &str, existing_max: i64) -> Result<RecordId, StorageError> {
        let seq_key = format!("{key}.seq");
        let high_water = match self.kv.get(&seq_key)? {
            Some(raw) => raw.trim().parse::<i64>().unwrap_or_else(|_| {
                tracing::warn!(key = %seq_key, "unreadable id sequence, rebuilding from data");
                0
            }),
            None => 0,
        };
        let next = existing_max
            .max(high_water)
            .checked_add(1)
            .ok_or_else(|| StorageError::IdsExhausted {
                key: key.to_string(),
            })?;
        self.kv.set(&seq_key, &next.to_string())?;
        Ok(RecordId(next))
    }

    fn read_parties(&self, kind: PartyKind) -> Result<Vec<Party>, StorageError> {
        self.read_collection(kind.storage_key())
    }

    fn read_songs(&self) -> Result<Vec<Song>, StorageError> {
        self.read_collection(SONGS_KEY)
    }

    fn parties_for_write(&self, kind: PartyKind) -> Result<Vec<Party>, StorageError> {
        self.read_collection_for_write(kind.storage_key())
    }

    fn songs_for_write(&self) -> Result<Vec<Song>, StorageError> {
        self.read_collection_for_write(SONGS_KEY)
    }

    fn name_index(&self, kind: PartyKind) -> Result<HashMap<RecordId, String>, StorageError> {
        Ok(self
            .read_parties(kind)?
            .into_iter()
            .map(|party| (party.id, party.name))
            .collect())
    }

    /// Snapshots the current parent names for joining.
    fn parent_names(&self) -> Result<ParentNames, StorageError> {
        Ok(ParentNames {
            singers: self.name_index(PartyKind::Singer)?,
            composers: self.name_index(PartyKind::Composer)?,
            companies: self.name_index(PartyKind::RecordCompany)?,
        })
    }
}

/// Parent name lookups used to materialize the song join.
struct ParentNames {
    singers: HashMap<RecordId, String>,
    composers: HashMap<RecordId, String>,
    companies: HashMap<RecordId, String>,
}

impl ParentNames {
    fn join(&self, song: Song) -> JoinedSong {
        let lookup = |index: &HashMap<RecordId, String>, id: Option<RecordId>| {
            id.and_then(|id| index.get(&id).cloned()).unwrap_or_default()
        };
        JoinedSong {
            singer_name: lookup(&self.singers, song.singer_id),
            composer_name: lookup(&self.composers, song.composer_id),
            record_company_name: lookup(&self.companies, song.record_company_id),
            song,
        }
    }
}

impl ShopStore for LocalStore {
    fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, StorageError> {
        self.read_parties(kind)
    }

    fn create_party(
        &mut self,
        kind: PartyKind,
        fields: &PartyFields,
    ) -> Result<Party, StorageError> {
        fields.validate()?;
        let mut parties = self.parties_for_write(kind)?;
        let max = parties.iter().map(|p| p.id.0).max().unwrap_or(0);
        let id = self.allocate_id(kind.storage_key(), max)?;

        let party = Party::from_fields(id, fields.clone());
        parties.push(party.clone());
        self.write_collection(kind.storage_key(), &parties)?;
        Ok(party)
    }

    fn update_party(
        &mut self,
        kind: PartyKind,
        id: RecordId,
        fields: &PartyFields,
    ) -> Result<Party, StorageError> {
        fields.validate()?;
        let mut parties = self.parties_for_write(kind)?;
        let slot = parties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StorageError::NotFound {
                kind: kind.label(),
                id: id.0,
            })?;
        *slot = Party::from_fields(id, fields.clone());
        let updated = slot.clone();
        self.write_collection(kind.storage_key(), &parties)?;
        Ok(updated)
    }

    fn delete_party(&mut self, kind: PartyKind, id: RecordId) -> Result<(), StorageError> {
        let mut parties = self.parties_for_write(kind)?;
        let before = parties.len();
        parties.retain(|p| p.id != id);
        if parties.len() == before {
            return Err(StorageError::NotFound {
                kind: kind.label(),
                id: id.0,
            });
        }
        self.write_collection(kind.storage_key(), &parties)
    }

    fn list_songs(&self) -> Result<Vec<JoinedSong>, StorageError> {
        let names = self.parent_names()?;
        Ok(self.read_songs()?.into_iter().map(|s| names.join(s)).collect())
    }

    fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, StorageError> {
        Ok(filter_songs(self.list_songs()?, term))
    }

    fn create_song(&mut self, fields: &SongFields) -> Result<JoinedSong, StorageError> {
        fields.validate()?;
        let mut songs = self.songs_for_write()?;
        let max = songs.iter().map(|s| s.id.0).max().unwrap_or(0);
        let id = self.allocate_id(SONGS_KEY, max)?;

        let song = Song::from_fields(id, fields.clone());
        songs.push(song.clone());
        self.write_collection(SONGS_KEY, &songs)?;
        Ok(self.parent_names()?.join(song))
    }

    fn update_song(
        &mut self,
        id: RecordId,
        fields: &SongFields,
    ) -> Result<JoinedSong, StorageError> {
        fields.validate()?;
        let mut songs = self.songs_for_write()?;
        let slot = songs
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StorageError::NotFound {
                kind: SONG_KIND,
                id: id.0,
            })?;
        *slot = Song::from_fields(id, fields.clone());
        let updated = slot.clone();
        self.write_collection(SONGS_KEY, &songs)?;
        Ok(self.parent_names()?.join(updated))
    }

    fn delete_song(&mut self, id: RecordId) -> Result<(), StorageError> {
        let mut songs = self.songs_for_write()?;
        let before = songs.len();
        songs.retain(|s| s.id != id);
        if songs.len() == before {
            return Err(StorageError::NotFound {
                kind: SONG_KIND,
                id: id.0,
            });
        }
        self.write_collection(SONGS_KEY, &songs)
    }
}

//! SQLite implementation of [`ShopStore`].
//!
//! [`SqliteStore`] keeps the five shop tables in one SQLite database with WAL
//! mode and automatic schema migrations. Every statement is parameterized;
//! table names only ever come from the closed [`PartyKind`] enum.

use rusqlite::{params, Connection, OptionalExtension, Row};

use musicshop_core::{JoinedSong, Party, PartyFields, PartyKind, RecordId, Song, SongFields};

use crate::error::StorageError;
use crate::schema::CONTAINS_FN;
use crate::traits::ShopStore;

const SONG_KIND: &str = "Song";

/// Songs left-joined with the names of the rows they reference.
const JOINED_SONGS: &str = "
    SELECT s.id, s.title, s.movie_name, s.price, s.duration, s.category,
           s.available_as, s.size, s.singer_id, s.composer_id, s.record_company_id,
           COALESCE(singer.name, ''),
           COALESCE(composer.name, ''),
           COALESCE(rc.name, '')
    FROM songs s
    LEFT JOIN singers singer ON s.singer_id = singer.id
    LEFT JOIN composers composer ON s.composer_id = composer.id
    LEFT JOIN record_companies rc ON s.record_company_id = rc.id";

/// SQLite-backed implementation of [`ShopStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a SQLite database at `path`.
    pub fn new(path: &str) -> Result<Self, StorageError> {
        let conn = crate::schema::open_database(path)?;
        Ok(SqliteStore { conn })
    }

    /// Opens an in-memory SQLite database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = crate::schema::open_in_memory()?;
        Ok(SqliteStore { conn })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn party_from_row(row: &Row<'_>) -> rusqlite::Result<Party> {
        Ok(Party {
            id: RecordId(row.get(0)?),
            name: row.get(1)?,
            contact: row.get(2)?,
            address: row.get(3)?,
        })
    }

    fn joined_from_row(row: &Row<'_>) -> rusqlite::Result<JoinedSong> {
        Ok(JoinedSong {
            song: Song {
                id: RecordId(row.get(0)?),
                title: row.get(1)?,
                movie_name: row.get(2)?,
                price: row.get(3)?,
                duration: row.get(4)?,
                category: row.get(5)?,
                available_as: row.get(6)?,
                size: row.get(7)?,
                singer_id: row.get::<_, Option<i64>>(8)?.map(RecordId),
                composer_id: row.get::<_, Option<i64>>(9)?.map(RecordId),
                record_company_id: row.get::<_, Option<i64>>(10)?.map(RecordId),
            },
            singer_name: row.get(11)?,
            composer_name: row.get(12)?,
            record_company_name: row.get(13)?,
        })
    }

    /// Loads one joined song, or `NotFound`.
    fn joined_song(&self, id: RecordId) -> Result<JoinedSong, StorageError> {
        let sql = format!("{JOINED_SONGS} WHERE s.id = ?1");
        self.conn
            .query_row(&sql, params![id.0], Self::joined_from_row)
            .optional()?
            .ok_or(StorageError::NotFound {
                kind: SONG_KIND,
                id: id.0,
            })
    }

    fn query_joined(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<JoinedSong>, StorageError> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt.query_map(params, Self::joined_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }
}

impl ShopStore for SqliteStore {
    fn list_parties(&self, kind: PartyKind) -> Result<Vec<Party>, StorageError> {
        let sql = format!(
            "SELECT id, name, contact, address FROM {} ORDER BY id",
            kind.table()
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], Self::party_from_row)?;
        let mut result = Vec::new();
        for row in rows {
            result.push(row?);
        }
        Ok(result)
    }

    fn create_party(
        &mut self,
        kind: PartyKind,
        fields: &PartyFields,
    ) -> Result<Party, StorageError> {
        fields.validate()?;
        let tx = self.conn.transaction()?;
        tx.execute(
            &format!(
                "INSERT INTO {} (name, contact, address) VALUES (?1, ?2, ?3)",
                kind.table()
            ),
            params![fields.name, fields.contact, fields.address],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        Ok(Party::from_fields(RecordId(id), fields.clone()))
    }

    fn update_party(
        &mut self,
        kind: PartyKind,
        id: RecordId,
        fields: &PartyFields,
    ) -> Result<Party, StorageError> {
        fields.validate()?;
        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET name = ?1, contact = ?2, address = ?3 WHERE id = ?4",
                kind.table()
            ),
            params![fields.name, fields.contact, fields.address, id.0],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: kind.label(),
                id: id.0,
            });
        }
        Ok(Party::from_fields(id, fields.clone()))
    }

    fn delete_party(&mut self, kind: PartyKind, id: RecordId) -> Result<(), StorageError> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", kind.table()),
            params![id.0],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: kind.label(),
                id: id.0,
            });
        }
        Ok(())
    }

    fn list_songs(&self) -> Result<Vec<JoinedSong>, StorageError> {
        let sql = format!("{JOINED_SONGS} ORDER BY s.id");
        self.query_joined(&sql, [])
    }

    fn search_songs(&self, term: &str) -> Result<Vec<JoinedSong>, StorageError> {
        if term.is_empty() {
            return self.list_songs();
        }
        let sql = format!(
            "{JOINED_SONGS}
             WHERE {f}(s.title, ?1)
                OR {f}(s.movie_name, ?1)
                OR {f}(singer.name, ?1)
                OR {f}(composer.name, ?1)
                OR {f}(rc.name, ?1)
             ORDER BY s.id",
            f = CONTAINS_FN
        );
        self.query_joined(&sql, params![term])
    }

    fn create_song(&mut self, fields: &SongFields) -> Result<JoinedSong, StorageError> {
        fields.validate()?;
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO songs (
                title, movie_name, price, duration, category,
                available_as, size, singer_id, composer_id, record_company_id
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                fields.title,
                fields.movie_name,
                fields.price,
                fields.duration,
                fields.category,
                fields.available_as,
                fields.size,
                fields.singer_id.map(|id| id.0),
                fields.composer_id.map(|id| id.0),
                fields.record_company_id.map(|id| id.0),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;
        self.joined_song(RecordId(id))
    }

    fn update_song(
        &mut self,
        id: RecordId,
        fields: &SongFields,
    ) -> Result<JoinedSong, StorageError> {
        fields.validate()?;
        let changed = self.conn.execute(
            "UPDATE songs SET
                title = ?1, movie_name = ?2, price = ?3, duration = ?4, category = ?5,
                available_as = ?6, size = ?7, singer_id = ?8, composer_id = ?9,
                record_company_id = ?10
             WHERE id = ?11",
            params![
                fields.title,
                fields.movie_name,
                fields.price,
                fields.duration,
                fields.category,
                fields.available_as,
                fields.size,
                fields.singer_id.map(|id| id.0),
                fields.composer_id.map(|id| id.0),
                fields.record_company_id.map(|id| id.0),
                id.0,
            ],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: SONG_KIND,
                id: id.0,
            });
        }
        self.joined_song(id)
    }

    fn delete_song(&mut self, id: RecordId) -> Result<(), StorageError> {
        let changed = self
            .conn
            .execute("DELETE FROM songs WHERE id = ?1", params![id.0])?;
        if changed == 0 {
            return Err(StorageError::NotFound {
                kind: SONG_KIND,
                id: id.0,
            });
        }
        Ok(())
    }
}

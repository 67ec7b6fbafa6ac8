//! SQL schema and migration setup for the SQLite backend.
//!
//! Uses `rusqlite_migration` to manage schema migrations via SQLite's
//! `user_version` pragma, so opening an existing database is a no-op.
//! Migrations are embedded at compile time via `include_str!`.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use rusqlite_migration::{Migrations, M};

use musicshop_core::search::contains_folded;

use crate::error::StorageError;

/// Name of the SQL function implementing case-folded containment.
pub const CONTAINS_FN: &str = "shop_contains";

/// All schema migrations, applied in order via `user_version` tracking.
fn migrations() -> Migrations<'static> {
    Migrations::new(vec![
        M::up(include_str!("migrations/001_initial_schema.sql")),
        // Future migrations added here as new M::up(...) entries.
    ])
}

/// Opens (or creates) a SQLite database at `path` with WAL mode, the search
/// function registered, and all pending migrations applied.
pub fn open_database(path: &str) -> Result<Connection, StorageError> {
    let mut conn = Connection::open(path)?;
    configure_and_migrate(&mut conn)?;
    Ok(conn)
}

/// Opens an in-memory SQLite database with the same setup.
pub fn open_in_memory() -> Result<Connection, StorageError> {
    let mut conn = Connection::open_in_memory()?;
    configure_and_migrate(&mut conn)?;
    Ok(conn)
}

/// Configures pragmas, registers functions and applies pending migrations.
fn configure_and_migrate(conn: &mut Connection) -> Result<(), StorageError> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    // Songs may outlive the singer/composer/company they point at.
    conn.pragma_update(None, "foreign_keys", "OFF")?;

    register_functions(conn)?;

    migrations()
        .to_latest(conn)
        .map_err(|e| StorageError::Migration(e.to_string()))?;

    Ok(())
}

/// Registers `shop_contains(haystack, needle)`.
///
/// NULL haystacks never match; this is what a LEFT JOIN miss produces.
fn register_functions(conn: &Connection) -> Result<(), StorageError> {
    conn.create_scalar_function(
        CONTAINS_FN,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: Option<String> = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(haystack.is_some_and(|h| contains_folded(&h, &needle)))
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_valid() {
        assert!(migrations().validate().is_ok());
    }

    #[test]
    fn reopening_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.db");
        let path = path.to_str().unwrap();

        let conn = open_database(path).unwrap();
        conn.execute("INSERT INTO singers (name) VALUES ('A')", [])
            .unwrap();
        drop(conn);

        let conn = open_database(path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM singers", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn contains_function_folds_case() {
        let conn = open_in_memory().unwrap();
        let hit: bool = conn
            .query_row("SELECT shop_contains('Moonlight', 'MOON')", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(hit);

        let miss: bool = conn
            .query_row("SELECT shop_contains(NULL, '')", [], |row| row.get(0))
            .unwrap();
        assert!(!miss);
    }
}

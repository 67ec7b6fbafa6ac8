//! Storage layer for the music shop inventory.
//!
//! Provides the [`ShopStore`] trait defining the storage contract that all
//! backends implement, plus two first-class backends:
//!
//! - [`SqliteStore`]: the relational store behind the HTTP API. Schema is
//!   created by an embedded migration on open.
//! - [`LocalStore`]: the fallback store used when the API is not the active
//!   backend. Each collection is one JSON document in a [`KeyValueStore`].
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`traits`]: ShopStore trait definition
//! - [`schema`]: migrations and connection setup for SQLite
//! - [`sqlite`]: SqliteStore implementation
//! - [`kv`]: key-value persistence for the local store
//! - [`local`]: LocalStore implementation

pub mod error;
pub mod kv;
pub mod local;
pub mod schema;
pub mod sqlite;
pub mod traits;

// Re-export key types for ergonomic use.
pub use error::StorageError;
pub use kv::{FileKeyValue, KeyValueStore, MemoryKeyValue};
pub use local::LocalStore;
pub use sqlite::SqliteStore;
pub use traits::ShopStore;

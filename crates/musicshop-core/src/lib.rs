//! Data model for the music shop inventory.
//!
//! Five record types live here: four contact-style parties (singers,
//! composers, record companies, customers) and songs that reference three of
//! them. Request bodies arrive as lenient drafts and are validated into typed
//! fields before any store sees them.

pub mod error;
pub mod id;
pub mod party;
pub mod response;
pub mod search;
pub mod song;

// Re-export commonly used types
pub use error::CoreError;
pub use id::RecordId;
pub use party::{Party, PartyDraft, PartyFields, PartyKind};
pub use response::DeleteResponse;
pub use song::{JoinedSong, Song, SongDraft, SongFields};

//! API schema types for request/response definitions.
//!
//! Entity bodies are the core types themselves (`PartyDraft`, `SongDraft`,
//! `Party`, `JoinedSong`, `DeleteResponse`); only query-string shapes live
//! here.

pub mod songs;

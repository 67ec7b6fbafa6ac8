//! Case-insensitive substring search over joined songs.
//!
//! [`contains_folded`] is the single matching rule. The SQLite backend
//! registers it as a SQL function and the local store calls it directly, so
//! both return the same rows for the same data.

use crate::song::JoinedSong;

/// Folds text for comparison: Unicode lowercase.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// Returns true if `haystack` contains `needle`, ignoring case.
///
/// The empty needle is contained in every haystack.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    fold(haystack).contains(&fold(needle))
}

/// The five columns a search term is matched against, in query order.
pub fn searchable_fields(song: &JoinedSong) -> [&str; 5] {
    [
        song.song.title.as_str(),
        song.song.movie_name.as_str(),
        song.singer_name.as_str(),
        song.composer_name.as_str(),
        song.record_company_name.as_str(),
    ]
}

/// Returns true if any searchable field of `song` contains `term`.
pub fn matches(song: &JoinedSong, term: &str) -> bool {
    searchable_fields(song)
        .iter()
        .any(|field| contains_folded(field, term))
}

/// Filters joined songs down to those matching `term`, preserving order.
pub fn filter_songs(songs: Vec<JoinedSong>, term: &str) -> Vec<JoinedSong> {
    if term.is_empty() {
        return songs;
    }
    songs.into_iter().filter(|song| matches(song, term)).collect()
}

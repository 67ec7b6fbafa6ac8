//! Song handlers, including search.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use musicshop_core::{DeleteResponse, JoinedSong, RecordId, SongDraft};

use crate::error::ApiError;
use crate::schema::songs::SearchQuery;
use crate::state::AppState;

/// Lists every song joined with its related names.
///
/// `GET /api/songs`
pub async fn list_songs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JoinedSong>>, ApiError> {
    let service = state.service.lock().await;
    let songs = service.list_songs()?;
    Ok(Json(songs))
}

/// `POST /api/songs`
pub async fn create_song(
    State(state): State<AppState>,
    body: Result<Json<SongDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<JoinedSong>), ApiError> {
    let Json(draft) = body?;
    let mut service = state.service.lock().await;
    let song = service.create_song(draft)?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// `PUT /api/songs/{id}`
pub async fn update_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<SongDraft>, JsonRejection>,
) -> Result<Json<JoinedSong>, ApiError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    let mut service = state.service.lock().await;
    let song = service.update_song(RecordId(id), draft)?;
    Ok(Json(song))
}

/// `DELETE /api/songs/{id}`
pub async fn delete_song(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id?;
    let mut service = state.service.lock().await;
    let response = service.delete_song(RecordId(id))?;
    Ok(Json(response))
}

/// Case-insensitive substring search over title, movie and joined names.
///
/// `GET /api/search/songs?term=...`
pub async fn search_songs(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<JoinedSong>>, ApiError> {
    let Query(query) = query?;
    let service = state.service.lock().await;
    let songs = service.search_songs(query.term())?;
    Ok(Json(songs))
}

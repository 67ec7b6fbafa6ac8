//! Singer, composer, record company and customer handlers.
//!
//! The four kinds share one set of handlers; the router binds each route to
//! its [`PartyKind`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use musicshop_core::{DeleteResponse, Party, PartyDraft, PartyKind, RecordId};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/{collection}`
pub async fn list(
    State(state): State<AppState>,
    kind: PartyKind,
) -> Result<Json<Vec<Party>>, ApiError> {
    let service = state.service.lock().await;
    let parties = service.list_parties(kind)?;
    Ok(Json(parties))
}

/// `POST /api/{collection}`
pub async fn create(
    State(state): State<AppState>,
    kind: PartyKind,
    body: Result<Json<PartyDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Party>), ApiError> {
    let Json(draft) = body?;
    let mut service = state.service.lock().await;
    let party = service.create_party(kind, draft)?;
    Ok((StatusCode::CREATED, Json(party)))
}

/// `PUT /api/{collection}/{id}`
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    kind: PartyKind,
    body: Result<Json<PartyDraft>, JsonRejection>,
) -> Result<Json<Party>, ApiError> {
    let Path(id) = id?;
    let Json(draft) = body?;
    let mut service = state.service.lock().await;
    let party = service.update_party(kind, RecordId(id), draft)?;
    Ok(Json(party))
}

/// `DELETE /api/{collection}/{id}`
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    kind: PartyKind,
) -> Result<Json<DeleteResponse>, ApiError> {
    let Path(id) = id?;
    let mut service = state.service.lock().await;
    let response = service.delete_party(kind, RecordId(id))?;
    Ok(Json(response))
}

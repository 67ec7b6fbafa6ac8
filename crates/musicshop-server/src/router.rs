//! Router assembly for the shop HTTP API.
//!
//! [`build_router`] wires all handler functions to their routes with
//! CORS and tracing middleware layers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::routing::{get, put};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use musicshop_core::{PartyDraft, PartyKind};

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax.
/// CORS is permissive (the browser front end is served from another origin).
/// TraceLayer provides request-level logging via tracing.
pub fn build_router(state: AppState) -> Router {
    let mut router: Router<AppState> = Router::new();
    for kind in PartyKind::ALL {
        router = router.merge(party_routes(kind));
    }

    router
        .route(
            "/api/songs",
            get(handlers::songs::list_songs).post(handlers::songs::create_song),
        )
        .route(
            "/api/songs/{id}",
            put(handlers::songs::update_song).delete(handlers::songs::delete_song),
        )
        .route("/api/search/songs", get(handlers::songs::search_songs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// List/create and update/delete routes for one party kind.
fn party_routes(kind: PartyKind) -> Router<AppState> {
    let collection = format!("/api/{}", kind.collection());
    let item = format!("{}/{{id}}", collection);

    Router::new()
        .route(
            &collection,
            get(move |state: State<AppState>| handlers::parties::list(state, kind)).post(
                move |state: State<AppState>, body: Result<Json<PartyDraft>, JsonRejection>| {
                    handlers::parties::create(state, kind, body)
                },
            ),
        )
        .route(
            &item,
            put(
                move |state: State<AppState>,
                      id: Result<Path<i64>, PathRejection>,
                      body: Result<Json<PartyDraft>, JsonRejection>| {
                    handlers::parties::update(state, id, kind, body)
                },
            )
            .delete(move |state: State<AppState>, id: Result<Path<i64>, PathRejection>| {
                handlers::parties::delete(state, id, kind)
            }),
        )
}

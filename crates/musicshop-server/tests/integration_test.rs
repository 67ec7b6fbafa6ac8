//! End-to-end integration tests for the shop HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> handler ->
//! ShopService -> SqliteStore -> HTTP response.
//!
//! Each test creates a fresh AppState backed by an in-memory SQLite database
//! and uses `tower::ServiceExt::oneshot` to send requests directly to the
//! router without starting a network server.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use musicshop_server::router::build_router;
use musicshop_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn test_app() -> Router {
    let state = AppState::in_memory().expect("failed to create in-memory AppState");
    build_router(state)
}

async fn request_json(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(json!(null));
    (status, json)
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    request_json(app, Method::GET, path, None).await
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    request_json(app, Method::POST, path, Some(body)).await
}

async fn put_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    request_json(app, Method::PUT, path, Some(body)).await
}

async fn delete(app: &Router, path: &str) -> (StatusCode, Value) {
    request_json(app, Method::DELETE, path, None).await
}

/// Creates a party and returns its id.
async fn create_party(app: &Router, collection: &str, name: &str) -> i64 {
    let (status, body) = post_json(
        app,
        &format!("/api/{}", collection),
        json!({ "name": name, "contact": "555", "address": "Main St" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {:?}", body);
    body["id"].as_i64().unwrap()
}

fn song_body(title: &str, movie: &str) -> Value {
    json!({
        "title": title,
        "movie_name": movie,
        "price": "9.99",
        "duration": "4:20",
        "category": "Film",
        "available_as": "CD",
        "size": "3.5",
        "singer_id": "",
        "composer_id": "",
        "record_company_id": ""
    })
}

const COLLECTIONS: [&str; 4] = ["singers", "composers", "record-companies", "customers"];

// ---------------------------------------------------------------------------
// Party routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_party_crud_for_every_collection() {
    let app = test_app();

    for collection in COLLECTIONS {
        let path = format!("/api/{}", collection);

        let (status, body) = get_json(&app, &path).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));

        let (status, created) = post_json(
            &app,
            &path,
            json!({ "name": "A", "contact": "1", "address": "x" }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{collection}");
        assert_eq!(created["name"], "A");
        assert_eq!(created["contact"], "1");
        assert_eq!(created["address"], "x");
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = put_json(
            &app,
            &format!("{}/{}", path, id),
            json!({ "name": "B", "contact": "2", "address": "y" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{collection}");
        assert_eq!(
            updated,
            json!({ "id": id, "name": "B", "contact": "2", "address": "y" })
        );

        let (_, listed) = get_json(&app, &path).await;
        assert_eq!(listed, json!([updated]));

        let (status, body) = delete(&app, &format!("{}/{}", path, id)).await;
        assert_eq!(status, StatusCode::OK, "{collection}");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .ends_with("deleted successfully"));

        let (_, listed) = get_json(&app, &path).await;
        assert_eq!(listed, json!([]));
    }
}

#[tokio::test]
async fn test_delete_messages_name_the_entity() {
    let app = test_app();
    let id = create_party(&app, "record-companies", "HMV").await;
    let (_, body) = delete(&app, &format!("/api/record-companies/{}", id)).await;
    assert_eq!(body, json!({ "message": "Record company deleted successfully" }));
}

#[tokio::test]
async fn test_missing_name_is_bad_request() {
    let app = test_app();
    for collection in COLLECTIONS {
        let (status, body) = post_json(
            &app,
            &format!("/api/{}", collection),
            json!({ "contact": "1", "address": "x" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{collection}");
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["error"].as_str().unwrap().contains("name"));
    }
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = test_app();

    let (status, body) = put_json(
        &app,
        "/api/singers/42",
        json!({ "name": "A", "contact": "", "address": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = delete(&app, "/api/customers/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = put_json(&app, "/api/songs/42", song_body("T", "M")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, "/api/songs/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = test_app();
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/singers")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bad_path_ids_return_json_errors() {
    let app = test_app();
    let party = json!({ "name": "A", "contact": "", "address": "" });

    let cases = [
        request_json(&app, Method::DELETE, "/api/singers/abc", None).await,
        request_json(&app, Method::PUT, "/api/customers/1.5", Some(party)).await,
        request_json(&app, Method::DELETE, "/api/songs/99999999999999999999", None).await,
        request_json(&app, Method::PUT, "/api/songs/x", Some(song_body("T", "M"))).await,
    ];
    for (status, body) in cases {
        assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", body);
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_bad_search_query_returns_json_error() {
    let app = test_app();
    let (status, body) = get_json(&app, "/api/search/songs?term=a&term=b").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_ids_are_unique_and_stable() {
    let app = test_app();
    let a = create_party(&app, "singers", "A").await;
    let b = create_party(&app, "singers", "B").await;
    let (_, _) = delete(&app, &format!("/api/singers/{}", b)).await;
    let c = create_party(&app, "singers", "C").await;

    assert_ne!(a, b);
    assert!(c > b, "ids must not be reused");

    let (_, listed) = get_json(&app, "/api/singers").await;
    let ids: Vec<i64> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![a, c]);
}

// ---------------------------------------------------------------------------
// Song routes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_song_coerces_numbers() {
    let app = test_app();
    let (status, song) = post_json(&app, "/api/songs", song_body("T", "M")).await;
    assert_eq!(status, StatusCode::CREATED, "{:?}", song);
    assert_eq!(song["price"], json!(9.99));
    assert_eq!(song["size"], json!(3.5));
    assert_eq!(song["singer_id"], Value::Null);
    assert_eq!(song["singer_name"], "");
}

#[tokio::test]
async fn test_create_song_rejects_bad_price() {
    let app = test_app();
    let mut body = song_body("T", "M");
    body["price"] = json!("free");
    let (status, body) = post_json(&app, "/api/songs", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("price"));

    let (_, listed) = get_json(&app, "/api/songs").await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_song_list_joins_names_and_survives_parent_delete() {
    let app = test_app();
    let singer = create_party(&app, "singers", "A").await;
    let composer = create_party(&app, "composers", "C").await;
    let company = create_party(&app, "record-companies", "R").await;

    let mut body = song_body("T", "M");
    body["singer_id"] = json!(singer);
    body["composer_id"] = json!(composer);
    body["record_company_id"] = json!(company);
    let (status, song) = post_json(&app, "/api/songs", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(song["singer_name"], "A");
    assert_eq!(song["composer_name"], "C");
    assert_eq!(song["record_company_name"], "R");

    let (status, _) = delete(&app, &format!("/api/singers/{}", singer)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, listed) = get_json(&app, "/api/songs").await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["singer_id"], json!(singer));
    assert_eq!(listed[0]["singer_name"], "");
    assert_eq!(listed[0]["composer_name"], "C");
}

#[tokio::test]
async fn test_update_and_delete_song() {
    let app = test_app();
    let (_, song) = post_json(&app, "/api/songs", song_body("Old", "M")).await;
    let id = song["id"].as_i64().unwrap();

    let mut body = song_body("New", "M2");
    body["price"] = json!(20);
    let (status, updated) = put_json(&app, &format!("/api/songs/{}", id), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["title"], "New");
    assert_eq!(updated["price"], json!(20.0));

    let (status, body) = delete(&app, &format!("/api/songs/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Song deleted successfully" }));

    let (_, listed) = get_json(&app, "/api/songs").await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_search_songs() {
    let app = test_app();
    let aria = create_party(&app, "singers", "Aria").await;
    let bria = create_party(&app, "singers", "Bria").await;

    let mut moon = song_body("Moonlight", "Night");
    moon["singer_id"] = json!(aria);
    post_json(&app, "/api/songs", moon).await;
    let mut sun = song_body("Sunrise", "Day");
    sun["singer_id"] = json!(bria);
    post_json(&app, "/api/songs", sun).await;

    let titles = |body: &Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap().to_string())
            .collect()
    };

    let (status, hits) = get_json(&app, "/api/search/songs?term=ria").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&hits), vec!["Moonlight", "Sunrise"]);

    let (_, hits) = get_json(&app, "/api/search/songs?term=MOON").await;
    assert_eq!(titles(&hits), vec!["Moonlight"]);

    let (_, hits) = get_json(&app, "/api/search/songs?term=b%20ria").await;
    assert!(titles(&hits).is_empty());

    let (_, all) = get_json(&app, "/api/songs").await;
    let (_, empty_term) = get_json(&app, "/api/search/songs?term=").await;
    let (_, no_term) = get_json(&app, "/api/search/songs").await;
    assert_eq!(empty_term, all);
    assert_eq!(no_term, all);
}

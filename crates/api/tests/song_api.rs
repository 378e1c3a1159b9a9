//! HTTP-level integration tests for the `/songs` endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener. The metadata provider is stubbed.

mod common;

use axum::http::StatusCode;
use common::{body_json, body_text, delete, get, put_json, STUB_TEXT};
use songlib_db::models::song::CreateSong;
use songlib_db::repositories::SongRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn insert(pool: &PgPool, group: &str, name: &str) -> i64 {
    SongRepo::create(
        pool,
        &CreateSong {
            group_name: group.to_string(),
            song_name: name.to_string(),
            release_date: "01.01.2000".to_string(),
            text: STUB_TEXT.to_string(),
            link: String::new(),
        },
    )
    .await
    .unwrap()
    .id
}

fn ids(json: &serde_json::Value) -> Vec<i64> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// PUT /songs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_song_fills_metadata(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/songs",
        serde_json::json!({"group": "Muse", "song": "Supermassive Black Hole"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["data"]["id"].is_number());
    assert_eq!(json["data"]["group_name"], "Muse");
    assert_eq!(json["data"]["song_name"], "Supermassive Black Hole");
    assert_eq!(json["data"]["release_date"], "16.07.2006");
    assert_eq!(json["data"]["text"], STUB_TEXT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_song_accepts_field_aliases(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/songs",
        serde_json::json!({"group_name": "Muse", "song_name": "Uprising"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_song_rejects_blank_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/songs",
        serde_json::json!({"group": "  ", "song": "Uprising"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_song_missing_field_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(app, "/songs", serde_json::json!({"group": "Muse"})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_song_provider_failure_returns_502(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        "/songs",
        serde_json::json!({"group": "unavailable", "song": "Anything"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "METADATA_UNAVAILABLE");

    // Nothing was inserted.
    let app = common::build_test_app(pool);
    let response = get(app, "/songs").await;
    assert_eq!(body_text(response).await, "No songs found");
}

// ---------------------------------------------------------------------------
// GET /songs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_returns_plain_text(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/songs").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "No songs found");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_returns_all_songs_in_order(pool: PgPool) {
    let a = insert(&pool, "Muse", "A").await;
    let b = insert(&pool, "Queen", "B").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/songs").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![a, b]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_group(pool: PgPool) {
    let a = insert(&pool, "Muse", "A").await;
    insert(&pool, "Queen", "B").await;
    let c = insert(&pool, "Muse", "C").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/songs?group_name=Muse").await;

    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![a, c]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_empty_filter_value_is_ignored(pool: PgPool) {
    let a = insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/songs?group_name=&link=").await;

    let json = body_json(response).await;
    assert_eq!(ids(&json), vec![a]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_paginates(pool: PgPool) {
    let mut created = Vec::new();
    for i in 0..5 {
        created.push(insert(&pool, "G", &i.to_string()).await);
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/songs?page=2&limit=2").await).await;
    assert_eq!(ids(&json), vec![created[2], created[3]]);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/songs?page=3&limit=2").await).await;
    assert_eq!(ids(&json), vec![created[4]]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_partial_pagination_returns_everything(pool: PgPool) {
    for i in 0..3 {
        insert(&pool, "G", &i.to_string()).await;
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/songs?page=3").await).await;
    assert_eq!(json.as_array().unwrap().len(), 3);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/songs?limit=1").await).await;
    assert_eq!(json.as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_malformed_pagination_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/songs?page=abc&limit=2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_PARAMETER");

    let app = common::build_test_app(pool);
    let response = get(app, "/songs?page=1&limit=-2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_injection_payload_matches_nothing(pool: PgPool) {
    insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/songs?group_name=%27%20OR%20%271%27%3D%271").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "No songs found");
}

// ---------------------------------------------------------------------------
// GET /songs/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lyrics_full_text(pool: PgPool) {
    let id = insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/songs/{id}")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, STUB_TEXT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lyrics_single_verse_page(pool: PgPool) {
    let id = insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/songs/{id}?page=2&limit=1")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "verse2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lyrics_page_out_of_range_returns_404(pool: PgPool) {
    let id = insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/songs/{id}?page=5&limit=1")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "OUT_OF_RANGE");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lyrics_unknown_song_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/songs/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lyrics_malformed_limit_returns_400(pool: PgPool) {
    let id = insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/songs/{id}?page=1&limit=many")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// PUT /songs/{id}, DELETE /songs/{id}
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_song(pool: PgPool) {
    let id = insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/songs/{id}"),
        serde_json::json!({
            "group_name": "Muse",
            "song_name": "Renamed",
            "release_date": "02.02.2002",
            "text": "new\n\nlyrics",
            "link": "https://example.com/new",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], id);
    assert_eq!(json["data"]["song_name"], "Renamed");
    assert_eq!(json["data"]["text"], "new\n\nlyrics");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_song_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        "/songs/999999",
        serde_json::json!({"group_name": "Nobody"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_song_returns_204(pool: PgPool) {
    let id = insert(&pool, "Muse", "A").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/songs/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Subsequent GET should 404.
    let app = common::build_test_app(pool);
    let response = get(app, &format!("/songs/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unknown_song_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/songs/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Storage unavailable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_with_unreachable_database_returns_500() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/songs").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "QUERY_FAILED");
    assert_eq!(json["error"], "Database operation failed");
}

#[tokio::test]
async fn test_lyrics_with_unreachable_database_returns_500() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/songs/1").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "QUERY_FAILED");
}

#[tokio::test]
async fn test_delete_with_unreachable_database_returns_500() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = delete(app, "/songs/1").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

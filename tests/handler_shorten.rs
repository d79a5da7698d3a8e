mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use sqlx::PgPool;
use snaplink::api::handlers::shorten_handler;
use snaplink::state::AppState;

fn shorten_app(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_shorten_random_slug(pool: PgPool) {
    let (state, cache) = common::create_test_state(pool.clone());
    let server = shorten_app(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let slug = json["slug"].as_str().unwrap();
    assert_eq!(slug.len(), 7);
    assert!(
        slug.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
    assert_eq!(
        json["short_url"],
        format!("{}/{}", common::TEST_BASE_URL, slug)
    );
    assert_eq!(cache.peek(slug).as_deref(), Some("https://example.com"));
}

#[sqlx::test]
async fn test_shorten_with_custom_slug_and_title(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool.clone());
    let server = shorten_app(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({
            "url": "https://example.com/sale",
            "slug": "promo",
            "title": "Summer sale"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["slug"], "promo");
    assert_eq!(json["short_url"], "https://s.example.com/promo");

    let title: Option<String> = sqlx::query_scalar("SELECT title FROM links WHERE slug = 'promo'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title.as_deref(), Some("Summer sale"));
}

#[sqlx::test]
async fn test_shorten_duplicate_slug_conflict(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool.clone());
    let server = shorten_app(state);

    let body = json!({ "url": "https://example.com", "slug": "promo" });

    server
        .post("/api/shorten")
        .json(&body)
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://other.com", "slug": "promo" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "slug_taken");

    let url: String = sqlx::query_scalar("SELECT url FROM links WHERE slug = 'promo'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(url, "https://example.com");
}

#[sqlx::test]
async fn test_shorten_invalid_url(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool.clone());
    let server = shorten_app(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "ftp://example.com" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert_eq!(common::link_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_invalid_slug(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool.clone());
    let server = shorten_app(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://a.com", "slug": "ab" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_slug");
    assert_eq!(common::link_count(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_empty_slug_generates_random(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool);
    let server = shorten_app(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://a.com", "slug": "" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["slug"].as_str().unwrap().len(), 7);
}

#[sqlx::test]
async fn test_shorten_rejects_url_with_newline(pool: PgPool) {
    let (state, _cache) = common::create_test_state(pool.clone());
    let server = shorten_app(state);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://a.com/x\ny" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert_eq!(common::link_count(&pool).await, 0);
}

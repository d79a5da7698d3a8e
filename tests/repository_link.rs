mod common;

use sqlx::PgPool;
use std::sync::Arc;
use snaplink::domain::entities::NewLink;
use snaplink::domain::repositories::LinkRepository;
use snaplink::error::AppError;
use snaplink::infrastructure::persistence::PgLinkRepository;

fn new_link(slug: &str, url: &str) -> NewLink {
    NewLink {
        slug: slug.to_string(),
        url: url.to_string(),
        title: None,
    }
}

#[sqlx::test]
async fn test_create_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .create(NewLink {
            slug: "test123".to_string(),
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(link.slug, "test123");
    assert_eq!(link.url, "https://example.com");
    assert_eq!(link.title.as_deref(), Some("Example"));
    assert_eq!(link.click_count, 0);
}

#[sqlx::test]
async fn test_create_duplicate_slug_is_slug_taken(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));

    repo.create(new_link("promo", "https://first.com"))
        .await
        .unwrap();
    let err = repo
        .create(new_link("promo", "https://second.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::SlugTaken(ref s) if s == "promo"));

    let original = repo.find_by_slug("promo").await.unwrap().unwrap();
    assert_eq!(original.url, "https://first.com");
}

#[sqlx::test]
async fn test_slugs_are_case_sensitive(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.create(new_link("Promo", "https://upper.com"))
        .await
        .unwrap();
    repo.create(new_link("promo", "https://lower.com"))
        .await
        .unwrap();

    let upper = repo.find_by_slug("Promo").await.unwrap().unwrap();
    assert_eq!(upper.url, "https://upper.com");
}

#[sqlx::test]
async fn test_find_by_slug(pool: PgPool) {
    common::create_test_link(&pool, "abc123", "https://example.com").await;

    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.find_by_slug("abc123").await.unwrap();

    assert!(link.is_some());
    assert_eq!(link.unwrap().slug, "abc123");
}

#[sqlx::test]
async fn test_find_by_slug_not_found(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let result = repo.find_by_slug("notfound").await;

    assert!(result.is_ok());
    assert!(result.unwrap().is_none());
}

#[sqlx::test]
async fn test_exists(pool: PgPool) {
    common::create_test_link(&pool, "taken", "https://example.com").await;
    let repo = PgLinkRepository::new(Arc::new(pool));

    assert!(repo.exists("taken").await.unwrap());
    assert!(!repo.exists("free").await.unwrap());
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}

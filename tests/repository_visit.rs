mod common;

use sqlx::PgPool;
use std::sync::Arc;
use snaplink::domain::entities::VisitMetadata;
use snaplink::domain::repositories::VisitRepository;
use snaplink::error::AppError;
use snaplink::infrastructure::persistence::PgVisitRepository;

#[sqlx::test]
async fn test_record_visit_increments_and_appends(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "counted", "https://example.com").await;
    let repo = PgVisitRepository::new(Arc::new(pool.clone()));

    let visit = repo
        .record_visit(
            link_id,
            VisitMetadata::new(
                Some("203.0.113.7".to_string()),
                Some("Mozilla/5.0"),
                Some("https://news.example"),
            ),
        )
        .await
        .unwrap();

    assert_eq!(visit.link_id, link_id);
    assert_eq!(visit.ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(visit.referer.as_deref(), Some("https://news.example"));
    assert_eq!(common::click_count(&pool, "counted").await, 1);
    assert_eq!(common::visit_rows(&pool, "counted").await, 1);
}

#[sqlx::test]
async fn test_record_visit_missing_link_applies_nothing(pool: PgPool) {
    let repo = PgVisitRepository::new(Arc::new(pool.clone()));

    let err = repo
        .record_visit(424242, VisitMetadata::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

async fn record_concurrently(pool: PgPool, n: usize) {
    let slug = format!("burst{n}");
    let link_id = common::create_test_link(&pool, &slug, "https://example.com").await;
    let repo = Arc::new(PgVisitRepository::new(Arc::new(pool.clone())));

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.record_visit(
                    link_id,
                    VisitMetadata::new(Some(format!("10.0.0.{}", i % 250)), None, None),
                )
                .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(common::click_count(&pool, &slug).await, n as i64);
    assert_eq!(common::visit_rows(&pool, &slug).await, n as i64);
}

#[sqlx::test]
async fn test_concurrent_visits_single(pool: PgPool) {
    record_concurrently(pool, 1).await;
}

#[sqlx::test]
async fn test_concurrent_visits_ten(pool: PgPool) {
    record_concurrently(pool, 10).await;
}

#[sqlx::test]
async fn test_concurrent_visits_hundred(pool: PgPool) {
    record_concurrently(pool, 100).await;
}

#[sqlx::test]
async fn test_recent_visits_newest_first_and_limited(pool: PgPool) {
    let link_id = common::create_test_link(&pool, "history", "https://example.com").await;
    let repo = PgVisitRepository::new(Arc::new(pool.clone()));

    for i in 0..12 {
        repo.record_visit(
            link_id,
            VisitMetadata::new(Some(format!("10.0.0.{i}")), None, None),
        )
        .await
        .unwrap();
    }

    let recent = repo.recent_visits(link_id, 10).await.unwrap();

    assert_eq!(recent.len(), 10);
    assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    assert_eq!(recent[0].ip.as_deref(), Some("10.0.0.11"));
    assert_eq!(repo.count_visits(link_id).await.unwrap(), 12);
}

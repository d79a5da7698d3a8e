//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Visit, VisitMetadata};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

#[derive(Debug, FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    ip: Option<String>,
    user_agent: Option<String>,
    referer: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<VisitRow> for Visit {
    fn from(r: VisitRow) -> Self {
        Visit::new(r.id, r.link_id, r.ip, r.user_agent, r.referer, r.created_at)
    }
}

/// PostgreSQL repository for visit accounting.
///
/// `record_visit` runs the counter increment and the visit insert in one
/// transaction. The increment is expressed as `click_count + 1` in SQL, so the
/// row lock taken by `UPDATE` serializes concurrent recorders on the same link
/// without any application-side read-modify-write.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record_visit(
        &self,
        link_id: i64,
        metadata: VisitMetadata,
    ) -> Result<Visit, AppError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE id = $1")
            .bind(link_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound(format!("link {link_id}")));
        }

        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (link_id, ip, user_agent, referer)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, ip, user_agent, referer, created_at
            "#,
        )
        .bind(link_id)
        .bind(&metadata.ip)
        .bind(&metadata.user_agent)
        .bind(&metadata.referer)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn recent_visits(&self, link_id: i64, limit: i64) -> Result<Vec<Visit>, AppError> {
        let rows = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT id, link_id, ip, user_agent, referer, created_at
            FROM visits
            WHERE link_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(link_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Visit::from).collect())
    }

    async fn count_visits(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

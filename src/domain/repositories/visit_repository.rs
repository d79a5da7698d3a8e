//! Repository trait for visit accounting.

use crate::domain::entities::{Visit, VisitMetadata};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recording and reading visits.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_visit.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Atomically increments the link's click counter and appends one visit.
    ///
    /// Both mutations happen in a single transaction. The increment is a
    /// store-side `click_count + 1`, so concurrent callers never lose updates.
    /// If the future is dropped before commit, nothing is applied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist (nothing is written).
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn record_visit(&self, link_id: i64, metadata: VisitMetadata)
    -> Result<Visit, AppError>;

    /// Most recent visits for a link, newest first.
    async fn recent_visits(&self, link_id: i64, limit: i64) -> Result<Vec<Visit>, AppError>;

    /// Number of visit rows referencing a link.
    async fn count_visits(&self, link_id: i64) -> Result<i64, AppError>;
}

//! Repository trait for link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for provisioned links.
///
/// The store's unique constraint on `slug` is the final arbiter of slug
/// ownership. Application code never keeps its own set of taken slugs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with a zero click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugTaken`] if the slug is already owned, including
    /// when a concurrent insert wins the race.
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Point lookup by slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Checks whether any link owns `slug`.
    async fn exists(&self, slug: &str) -> Result<bool, AppError>;

    /// Verifies the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

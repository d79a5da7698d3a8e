//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching slug to URL mappings.
///
/// The cache is never authoritative. Implementations report failures through
/// [`CacheError`]; the services that touch the cache log those failures and
/// fall back to the durable store, so cache health never decides whether a
/// redirect or a provision succeeds.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with optional TTL
/// - [`crate::infrastructure::cache::MemoryCache`] - Process-local map
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the URL cached for a slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    async fn get_url(&self, slug: &str) -> CacheResult<Option<String>>;

    /// Stores a slug to URL mapping.
    ///
    /// Writing the same value twice is harmless, so concurrent populations of
    /// the same slug need no coordination.
    async fn set_url(&self, slug: &str, url: &str) -> CacheResult<()>;

    /// Removes a cached mapping.
    ///
    /// Required by any future path that changes a link's URL: invalidate
    /// before repopulating so the cache never serves a stale destination.
    async fn invalidate(&self, slug: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}

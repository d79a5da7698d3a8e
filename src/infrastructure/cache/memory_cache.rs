//! Process-local cache backed by a concurrent map.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Thread-safe in-memory cache mapping slug -> url.
///
/// Entries live until the process exits or they are invalidated. Each process
/// has its own copy, which is fine because entries are never authoritative and
/// URLs are immutable.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous peek, mostly useful in tests.
    pub fn peek(&self, slug: &str) -> Option<String> {
        self.inner.get(slug).map(|v| v.clone())
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, slug: &str) -> CacheResult<Option<String>> {
        Ok(self.peek(slug))
    }

    async fn set_url(&self, slug: &str, url: &str) -> CacheResult<()> {
        self.inner.insert(slug.to_string(), url.to_string());
        Ok(())
    }

    async fn invalidate(&self, slug: &str) -> CacheResult<()> {
        self.inner.remove(slug);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

//! Cache-aside read path from slug to destination URL.

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::application::services::VisitRecorder;
use crate::domain::deadline::Deadline;
use crate::domain::entities::{Link, Visit, VisitMetadata};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::is_valid_slug;

/// Outcome of the visit accounting step of a resolution.
///
/// Kept separate from the resolution result: by the time accounting runs the
/// destination is already known, so callers redirect regardless and only flag
/// the failure.
#[derive(Debug)]
pub enum VisitAccounting {
    Recorded(Visit),
    Failed(AppError),
}

impl VisitAccounting {
    pub fn is_recorded(&self) -> bool {
        matches!(self, VisitAccounting::Recorded(_))
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            VisitAccounting::Failed(e) => Some(e),
            VisitAccounting::Recorded(_) => None,
        }
    }
}

/// A successful slug resolution.
#[derive(Debug)]
pub struct Resolution {
    pub link_id: i64,
    pub slug: String,
    pub url: String,
    pub accounting: VisitAccounting,
}

/// Resolves slugs for redirects.
///
/// # Request Flow
///
/// 1. Check the cache for `slug`
/// 2. Hit: fetch the link from the store anyway, for its identity
/// 3. Miss: fetch from the store and populate the cache
/// 4. Record the visit synchronously
///
/// Cache failures are logged and treated as misses.
pub struct Resolver<L: LinkRepository, V: VisitRepository> {
    link_repository: Arc<L>,
    cache: Arc<dyn CacheService>,
    recorder: Arc<VisitRecorder<V>>,
}

impl<L: LinkRepository, V: VisitRepository> Resolver<L, V> {
    pub fn new(
        link_repository: Arc<L>,
        cache: Arc<dyn CacheService>,
        recorder: Arc<VisitRecorder<V>>,
    ) -> Self {
        Self {
            link_repository,
            cache,
            recorder,
        }
    }

    /// Resolves `slug` and records exactly one visit for it.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link owns the slug (no visit is recorded)
    /// - [`AppError::StoreUnavailable`], [`AppError::Timeout`], [`AppError::Cancelled`]
    ///   if the store lookup fails
    ///
    /// Visit recording failures do not fail the resolution; they are returned in
    /// [`Resolution::accounting`].
    pub async fn resolve(
        &self,
        slug: &str,
        metadata: VisitMetadata,
        deadline: &Deadline,
    ) -> Result<Resolution, AppError> {
        if !is_valid_slug(slug) {
            return Err(AppError::NotFound(slug.to_string()));
        }

        let (link, url) = match self.cached_url(slug, deadline).await {
            Some(url) => {
                // Cache hit still needs the store row for the visit's link_id.
                let link = self.find_link(slug, deadline).await?;
                (link, url)
            }
            None => {
                let link = self.find_link(slug, deadline).await?;
                self.populate_cache(slug, &link.url, deadline).await;
                let url = link.url.clone();
                (link, url)
            }
        };

        let accounting = match self.recorder.record(link.id, metadata, deadline).await {
            Ok(visit) => VisitAccounting::Recorded(visit),
            Err(e) => {
                warn!(slug, link_id = link.id, error = %e, "visit accounting failed");
                VisitAccounting::Failed(e)
            }
        };

        Ok(Resolution {
            link_id: link.id,
            slug: link.slug,
            url,
            accounting,
        })
    }

    async fn find_link(&self, slug: &str, deadline: &Deadline) -> Result<Link, AppError> {
        deadline
            .run(self.link_repository.find_by_slug(slug))
            .await?
            .ok_or_else(|| AppError::NotFound(slug.to_string()))
    }

    async fn cached_url(&self, slug: &str, deadline: &Deadline) -> Option<String> {
        let lookup = deadline.run(async {
            self.cache
                .get_url(slug)
                .await
                .map_err(AppError::from)
        });

        match lookup.await {
            Ok(Some(url)) => {
                counter!("shortener_cache_hits_total").increment(1);
                debug!(slug, "cache hit");
                Some(url)
            }
            Ok(None) => {
                counter!("shortener_cache_misses_total").increment(1);
                debug!(slug, "cache miss");
                None
            }
            Err(e) => {
                counter!("shortener_cache_errors_total").increment(1);
                warn!(slug, error = %e, "cache read failed, falling back to store");
                None
            }
        }
    }

    async fn populate_cache(&self, slug: &str, url: &str, deadline: &Deadline) {
        let write = deadline.run(async {
            self.cache
                .set_url(slug, url)
                .await
                .map_err(AppError::from)
        });

        if let Err(e) = write.await {
            counter!("shortener_cache_errors_total").increment(1);
            warn!(slug, error = %e, "cache populate failed");
        }
    }
}

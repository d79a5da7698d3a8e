//! Link provisioning service.

use std::sync::Arc;

use metrics::counter;
use tracing::{info, warn};

use crate::application::services::SlugGenerator;
use crate::domain::deadline::Deadline;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::url_validator::validate_target_url;

/// Service for creating short links.
///
/// Validates the destination, picks a slug (custom or random), inserts the link,
/// and warms the cache. The insert is the only step that decides ownership:
/// two requests racing for one custom slug both pass the advisory check, and
/// the unique constraint turns the loser's insert into [`AppError::SlugTaken`].
pub struct Provisioner<L: LinkRepository> {
    link_repository: Arc<L>,
    generator: SlugGenerator<L>,
    cache: Arc<dyn CacheService>,
}

impl<L: LinkRepository> Provisioner<L> {
    /// Creates a provisioner with the default slug retry budget.
    pub fn new(link_repository: Arc<L>, cache: Arc<dyn CacheService>) -> Self {
        let generator = SlugGenerator::new(link_repository.clone());
        Self::with_generator(link_repository, generator, cache)
    }

    pub fn with_generator(
        link_repository: Arc<L>,
        generator: SlugGenerator<L>,
        cache: Arc<dyn CacheService>,
    ) -> Self {
        Self {
            link_repository,
            generator,
            cache,
        }
    }

    /// Creates a short link.
    ///
    /// An empty `custom_slug` counts as absent and a blank `title` is stored as
    /// `NULL`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `url` is not an absolute http(s) URL
    /// - [`AppError::InvalidSlug`] if the custom slug is malformed
    /// - [`AppError::SlugTaken`] if the custom slug is owned, including by a
    ///   concurrent request that inserted first
    /// - [`AppError::ResourceExhausted`] if no free random slug was found
    /// - store and deadline errors
    ///
    /// [`AppError::Timeout`] and [`AppError::Cancelled`] do not mean the link
    /// was not written: the insert commits on its own, and the deadline may fire
    /// after the commit but before the reply arrives. A retry with the same
    /// custom slug then reports [`AppError::SlugTaken`].
    pub async fn create(
        &self,
        url: String,
        custom_slug: Option<String>,
        title: Option<String>,
        deadline: &Deadline,
    ) -> Result<Link, AppError> {
        validate_target_url(&url)?;

        let slug = match custom_slug.filter(|s| !s.is_empty()) {
            Some(custom) => self.generator.validate_custom(&custom, deadline).await?,
            None => self.generator.generate_random(deadline).await?,
        };

        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let new_link = NewLink { slug, url, title };
        let link = deadline.run(self.link_repository.create(new_link)).await?;

        counter!("shortener_links_created_total").increment(1);
        info!(slug = %link.slug, link_id = link.id, "link created");

        let populate = deadline.run(async {
            self.cache
                .set_url(&link.slug, &link.url)
                .await
                .map_err(AppError::from)
        });
        if let Err(e) = populate.await {
            counter!("shortener_cache_errors_total").increment(1);
            warn!(slug = %link.slug, error = %e, "cache populate failed after create");
        }

        Ok(link)
    }
}

/// Builds the public short URL from a base origin and a slug.
pub fn short_url(base_url: &str, slug: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), slug)
}

//! Collision-free slug selection.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::deadline::Deadline;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_slug, validate_custom_slug};

/// Upper bound on random draws before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Produces slugs that are free at the time of the check.
///
/// The existence check is advisory: another provisioner may claim the same slug
/// between the check and the insert. The store's unique constraint settles that
/// race and the loser observes [`AppError::SlugTaken`].
pub struct SlugGenerator<L: LinkRepository> {
    link_repository: Arc<L>,
    max_attempts: usize,
}

impl<L: LinkRepository> SlugGenerator<L> {
    pub fn new(link_repository: Arc<L>) -> Self {
        Self {
            link_repository,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the collision retry budget. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Draws random 7-character slugs until one is unused.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::ResourceExhausted`] when every attempt collided.
    /// Store failures (`StoreUnavailable`, `Timeout`, `Cancelled`) propagate as-is.
    pub async fn generate_random(&self, deadline: &Deadline) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let slug = generate_slug()?;

            if !deadline.run(self.link_repository.exists(&slug)).await? {
                return Ok(slug);
            }

            debug!(attempt, slug = %slug, "random slug collided, retrying");
        }

        warn!(
            attempts = self.max_attempts,
            "slug generation exhausted its retry budget"
        );
        Err(AppError::ResourceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Accepts a caller-chosen slug if it is well-formed and unowned.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidSlug`] if the candidate does not match `^[A-Za-z0-9_-]{3,64}$`
    /// - [`AppError::SlugTaken`] if a link already owns it
    pub async fn validate_custom(
        &self,
        candidate: &str,
        deadline: &Deadline,
    ) -> Result<String, AppError> {
        validate_custom_slug(candidate)?;

        if deadline.run(self.link_repository.exists(candidate)).await? {
            return Err(AppError::SlugTaken(candidate.to_string()));
        }

        Ok(candidate.to_string())
    }
}

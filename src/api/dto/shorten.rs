//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a single URL.
///
/// Length limits here reject oversized input before it reaches the store. Scheme
/// and slug shape rules are enforced by the provisioner.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination URL (absolute http/https).
    #[validate(length(min = 1, max = 2048, message = "url must be 1-2048 characters"))]
    pub url: String,

    /// Optional custom slug. Empty means "generate one".
    #[validate(length(max = 64, message = "slug must be at most 64 characters"))]
    pub slug: Option<String>,

    /// Optional human-readable title.
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub slug: String,
}

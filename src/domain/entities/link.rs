//! Link entity representing a slug to URL mapping.

use chrono::{DateTime, Utc};

/// A provisioned short link.
///
/// `slug` and `url` are immutable once created. `click_count` is a
/// denormalized count of recorded visits and only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub url: String,
    pub title: Option<String>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        slug: String,
        url: String,
        title: Option<String>,
        click_count: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug,
            url,
            title,
            click_count,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// The click counter always starts at zero and the creation timestamp is
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub slug: String,
    pub url: String,
    pub title: Option<String>,
}

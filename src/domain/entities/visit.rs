//! Visit entity representing a single recorded redirect.

use chrono::{DateTime, Utc};

/// A visit recorded when a slug is resolved.
///
/// Visits are append-only. All client metadata is optional because headers may
/// be missing or stripped by intermediaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Visit {
    /// Creates a new Visit instance.
    pub fn new(
        id: i64,
        link_id: i64,
        ip: Option<String>,
        user_agent: Option<String>,
        referer: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            link_id,
            ip,
            user_agent,
            referer,
            created_at,
        }
    }
}

/// Request metadata captured for a visit.
///
/// The timestamp is not part of the metadata; the store assigns it on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitMetadata {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl VisitMetadata {
    /// Builds metadata from borrowed header values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let meta = VisitMetadata::new(
    ///     Some("192.168.1.1".to_string()),
    ///     Some("Mozilla/5.0"),
    ///     Some("https://google.com"),
    /// );
    /// ```
    pub fn new(ip: Option<String>, user_agent: Option<&str>, referer: Option<&str>) -> Self {
        Self {
            ip,
            user_agent: user_agent.map(|s| s.to_string()),
            referer: referer.map(|s| s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_creation_with_all_fields() {
        let now = Utc::now();
        let visit = Visit::new(
            1,
            42,
            Some("192.168.1.1".to_string()),
            Some("Mozilla/5.0".to_string()),
            Some("https://google.com".to_string()),
            now,
        );

        assert_eq!(visit.id, 1);
        assert_eq!(visit.link_id, 42);
        assert_eq!(visit.ip.as_deref(), Some("192.168.1.1"));
        assert_eq!(visit.created_at, now);
    }

    #[test]
    fn test_metadata_str_conversion() {
        let meta = VisitMetadata::new(
            Some("10.0.0.1".to_string()),
            Some("Chrome/120"),
            Some("https://example.com"),
        );

        assert_eq!(meta.user_agent.as_deref(), Some("Chrome/120"));
        assert_eq!(meta.referer.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_metadata_minimal() {
        let meta = VisitMetadata::new(None, None, None);
        assert_eq!(meta, VisitMetadata::default());
    }
}

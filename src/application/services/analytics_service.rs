//! Per-link click analytics.

use std::sync::Arc;

use crate::domain::deadline::Deadline;
use crate::domain::entities::{Link, Visit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;

/// Number of recent visits included in a link report.
pub const RECENT_VISITS_LIMIT: i64 = 10;

/// Click total plus the latest visits for one link.
#[derive(Debug, Clone)]
pub struct LinkAnalytics {
    pub link: Link,
    pub recent_visits: Vec<Visit>,
}

impl LinkAnalytics {
    pub fn total_clicks(&self) -> i64 {
        self.link.click_count
    }
}

/// Read-only reporting over links and their visits. Never records a visit.
pub struct AnalyticsService<L: LinkRepository, V: VisitRepository> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: LinkRepository, V: VisitRepository> AnalyticsService<L, V> {
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Retrieves the click total and the 10 most recent visits for `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link owns the slug.
    pub async fn link_analytics(
        &self,
        slug: &str,
        deadline: &Deadline,
    ) -> Result<LinkAnalytics, AppError> {
        let link = deadline
            .run(self.link_repository.find_by_slug(slug))
            .await?
            .ok_or_else(|| AppError::NotFound(slug.to_string()))?;

        let recent_visits = deadline
            .run(
                self.visit_repository
                    .recent_visits(link.id, RECENT_VISITS_LIMIT),
            )
            .await?;

        Ok(LinkAnalytics {
            link,
            recent_visits,
        })
    }

    /// Counts stored visit rows for a link.
    ///
    /// Matches `click_count` whenever accounting is healthy; the admin CLI
    /// prints both so drift is visible.
    pub async fn visit_rows(&self, link_id: i64, deadline: &Deadline) -> Result<i64, AppError> {
        deadline
            .run(self.visit_repository.count_visits(link_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkRepository, MockVisitRepository};
    use chrono::Utc;

    #[tokio::test]
    async fn test_link_analytics_success() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_slug().times(1).returning(|slug| {
            Ok(Some(Link::new(
                1,
                slug.to_string(),
                "https://example.com".to_string(),
                None,
                5,
                Utc::now(),
            )))
        });

        let mut visits = MockVisitRepository::new();
        visits
            .expect_recent_visits()
            .withf(|link_id, limit| *link_id == 1 && *limit == RECENT_VISITS_LIMIT)
            .times(1)
            .returning(|link_id, _| {
                Ok(vec![Visit::new(
                    3,
                    link_id,
                    None,
                    Some("Mozilla/5.0".to_string()),
                    None,
                    Utc::now(),
                )])
            });

        let service = AnalyticsService::new(Arc::new(links), Arc::new(visits));
        let report = service
            .link_analytics("abc1234", &Deadline::none())
            .await
            .unwrap();

        assert_eq!(report.total_clicks(), 5);
        assert_eq!(report.recent_visits.len(), 1);
    }

    #[tokio::test]
    async fn test_link_analytics_not_found() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_slug().times(1).returning(|_| Ok(None));

        let mut visits = MockVisitRepository::new();
        visits.expect_recent_visits().times(0);

        let service = AnalyticsService::new(Arc::new(links), Arc::new(visits));
        let err = service
            .link_analytics("missing", &Deadline::none())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}

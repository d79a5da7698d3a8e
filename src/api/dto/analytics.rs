//! DTOs for per-link analytics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::LinkAnalytics;
use crate::domain::entities::Visit;

/// Click total and most recent visits for one short link.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub url: String,
    pub title: Option<String>,
    pub total_clicks: i64,
    pub created_at: DateTime<Utc>,
    pub recent_visits: Vec<VisitInfo>,
}

/// A single recorded visit.
#[derive(Debug, Serialize)]
pub struct VisitInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub date: DateTime<Utc>,
}

impl From<Visit> for VisitInfo {
    fn from(visit: Visit) -> Self {
        Self {
            ip: visit.ip,
            user_agent: visit.user_agent,
            referer: visit.referer,
            date: visit.created_at,
        }
    }
}

impl From<LinkAnalytics> for AnalyticsResponse {
    fn from(report: LinkAnalytics) -> Self {
        let total_clicks = report.total_clicks();
        Self {
            url: report.link.url,
            title: report.link.title,
            total_clicks,
            created_at: report.link.created_at,
            recent_visits: report.recent_visits.into_iter().map(VisitInfo::from).collect(),
        }
    }
}

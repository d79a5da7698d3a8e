//! Handler for per-link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click total and the 10 most recent visits for a slug.
///
/// # Endpoint
///
/// `GET /api/analytics/{slug}`
///
/// Does not count as a visit.
///
/// # Errors
///
/// Returns 404 Not Found if no link owns the slug.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let deadline = state.request_deadline();
    let report = state.analytics.link_analytics(&slug, &deadline).await?;

    Ok(Json(report.into()))
}

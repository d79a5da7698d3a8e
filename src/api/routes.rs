//! API route configuration.

use crate::api::handlers::{analytics_handler, health_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Read-only API routes.
///
/// # Endpoints
///
/// - `GET /analytics/{slug}` - Click total and recent visits for a link
/// - `GET /health`           - Store and cache health
pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/analytics/{slug}", get(analytics_handler))
        .route("/health", get(health_handler))
}

/// Link creation route.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
pub fn write_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}

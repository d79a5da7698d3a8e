//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`                - Short link redirect
//! - `POST /api/shorten`           - Create a short link
//! - `GET  /api/analytics/{slug}`  - Per-link click report
//! - `GET  /api/health`            - Health check: store and cache
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (stricter on `/api/shorten`)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting keys on `X-Forwarded-For` /
///   `X-Real-IP` instead of the peer socket address; enable only when the
///   service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let read_routes = api::routes::read_routes();
    let write_routes = api::routes::write_routes();

    let api_router = if behind_proxy {
        Router::new()
            .merge(read_routes.layer(rate_limit::proxied_layer()))
            .merge(write_routes.layer(rate_limit::secure_proxied_layer()))
    } else {
        Router::new()
            .merge(read_routes.layer(rate_limit::layer()))
            .merge(write_routes.layer(rate_limit::secure_layer()))
    };

    let router = Router::new()
        .route("/{slug}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::net::SocketAddr;
use tracing::warn;

use crate::domain::entities::VisitMetadata;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a slug to its destination URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Build visit metadata from the peer address and request headers
/// 2. Resolve the slug (cache first, store on miss)
/// 3. Record the visit before responding
/// 4. Return 302 Found
///
/// A failed visit write is logged and the redirect is still served.
///
/// # Errors
///
/// Returns 404 Not Found if no link owns the slug, 503/504 if the store is
/// unavailable or the request deadline passes.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let metadata = VisitMetadata::new(
        Some(client_ip(&headers, addr, state.behind_proxy)),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    let deadline = state.request_deadline();
    let resolution = state.resolver.resolve(&slug, metadata, &deadline).await?;

    if let Some(e) = resolution.accounting.error() {
        warn!(slug = %resolution.slug, error = %e, "redirect served without visit record");
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, resolution.url)]))
}

//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::short_url;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/landing",
///   "slug": "promo",          // optional
///   "title": "Summer promo"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_url": "https://s.example.com/promo",
///   "slug": "promo"
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL or slug
/// - 409 if the slug is already taken
/// - 503 if no free random slug was found or the store is unavailable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let deadline = state.request_deadline();
    let link = state
        .provisioner
        .create(payload.url, payload.slug, payload.title, &deadline)
        .await?;

    let short_url = short_url(&state.base_url, &link.slug);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url,
            slug: link.slug,
        }),
    ))
}

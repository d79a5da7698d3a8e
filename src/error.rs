//! Application error taxonomy and HTTP mapping.
//!
//! Client-facing variants (`InvalidUrl`, `InvalidSlug`, `SlugTaken`, `NotFound`)
//! are deterministic and never change under retry. Server-side variants
//! (`StoreUnavailable`, `Timeout`, ...) are retryable by the caller's own policy.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::infrastructure::cache::CacheError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error code plus human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid slug: {0}")]
    InvalidSlug(String),

    #[error("slug already taken: {0}")]
    SlugTaken(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("could not generate a unique slug after {attempts} attempts")]
    ResourceExhausted { attempts: usize },

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("cache unavailable: {0}")]
    CacheUnavailable(String),

    #[error("operation timed out")]
    Timeout,

    #[error("operation cancelled")]
    Cancelled,
}

impl AppError {
    /// Stable error code used in JSON responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl(_) => "invalid_url",
            AppError::InvalidSlug(_) => "invalid_slug",
            AppError::SlugTaken(_) => "slug_taken",
            AppError::NotFound(_) => "not_found",
            AppError::ResourceExhausted { .. } => "resource_exhausted",
            AppError::StoreUnavailable(_) => "store_unavailable",
            AppError::CacheUnavailable(_) => "cache_unavailable",
            AppError::Timeout => "timeout",
            AppError::Cancelled => "cancelled",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl(_) | AppError::InvalidSlug(_) => StatusCode::BAD_REQUEST,
            AppError::SlugTaken(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            AppError::ResourceExhausted { .. }
            | AppError::StoreUnavailable(_)
            | AppError::CacheUnavailable(_)
            | AppError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), "request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<CacheError> for AppError {
    fn from(e: CacheError) -> Self {
        AppError::CacheUnavailable(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let url_failed = e.field_errors().contains_key("url");
        if url_failed {
            AppError::InvalidUrl(e.to_string())
        } else {
            AppError::InvalidSlug(e.to_string())
        }
    }
}

/// Name of the unique constraint guarding slug ownership.
pub const SLUG_UNIQUE_CONSTRAINT: &str = "links_slug_key";

/// Translates a database error into the application taxonomy.
///
/// A unique violation on the slug constraint becomes [`AppError::SlugTaken`] so
/// that racing provisioners observe a deterministic client error.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        let constraint = db.constraint().unwrap_or_default();
        if constraint == SLUG_UNIQUE_CONSTRAINT {
            return AppError::SlugTaken("slug is already owned by another link".to_string());
        }
        return AppError::StoreUnavailable(format!("unique constraint violated: {constraint}"));
    }

    match e {
        sqlx::Error::PoolTimedOut => AppError::Timeout,
        other => AppError::StoreUnavailable(other.to_string()),
    }
}

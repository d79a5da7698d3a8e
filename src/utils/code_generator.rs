//! Slug generation and validation utilities.
//!
//! Provides cryptographically secure random slug generation and validation
//! for custom user-provided slugs.

use crate::error::AppError;
use regex::Regex;
use std::sync::LazyLock;

/// Length of randomly generated slugs.
pub const RANDOM_SLUG_LENGTH: usize = 7;

/// URL-safe alphabet. 64 symbols, so masking a random byte to 6 bits picks
/// each symbol with equal probability.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Allowed shape of any slug, custom or generated.
static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{3,64}$").expect("slug pattern is valid"));

/// Generates a cryptographically secure random slug.
///
/// Uses `getrandom` for entropy and maps each byte onto [`ALPHABET`],
/// producing a 7-character slug.
///
/// # Errors
///
/// Returns [`AppError::StoreUnavailable`] if the operating system entropy source fails.
///
/// # Examples
///
/// ```ignore
/// let slug = generate_slug()?;
/// assert_eq!(slug.len(), 7);
/// ```
pub fn generate_slug() -> Result<String, AppError> {
    let mut buffer = [0u8; RANDOM_SLUG_LENGTH];

    getrandom::fill(&mut buffer)
        .map_err(|e| AppError::StoreUnavailable(format!("entropy source failed: {e}")))?;

    Ok(buffer
        .iter()
        .map(|b| ALPHABET[(b & 0x3f) as usize] as char)
        .collect())
}

/// Returns true if `slug` has the allowed shape.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Validates a user-provided custom slug.
///
/// # Rules
///
/// - Length: 3-64 characters
/// - Allowed characters: ASCII letters, digits, `-`, `_`
///
/// # Errors
///
/// Returns [`AppError::InvalidSlug`] if any rule is violated.
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    if is_valid_slug(slug) {
        return Ok(());
    }

    let len = slug.chars().count();
    let reason = if !(3..=64).contains(&len) {
        format!("'{slug}' must be 3-64 characters, got {len}")
    } else {
        format!("'{slug}' may only contain letters, digits, '-' and '_'")
    };

    Err(AppError::InvalidSlug(reason))
}

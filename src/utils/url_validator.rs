//! Destination URL validation.

use crate::error::AppError;
use url::Url;

/// Checks that `input` is an absolute `http` or `https` URL with a host.
///
/// The URL is not rewritten; links store exactly what was submitted. The
/// parser silently drops control characters and surrounding whitespace, so
/// input carrying any of them is rejected instead: the stored string must be
/// usable verbatim as a `Location` header.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] if parsing fails, the input carries
/// characters the parser would strip, or the scheme is not allowed.
pub fn validate_target_url(input: &str) -> Result<Url, AppError> {
    if input.chars().any(char::is_control) || input.trim() != input {
        return Err(AppError::InvalidUrl(format!(
            "{input:?} contains control characters or surrounding whitespace"
        )));
    }

    let url = Url::parse(input).map_err(|e| AppError::InvalidUrl(format!("'{input}': {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(AppError::InvalidUrl(format!(
                "scheme '{other}' is not allowed, use http or https"
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(AppError::InvalidUrl(format!("'{input}' has no host")));
    }

    Ok(url)
}

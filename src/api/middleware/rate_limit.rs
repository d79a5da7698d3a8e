//! Rate limiting middleware using token bucket algorithm.
//!
//! Each limiter comes in two flavours: keyed by the socket peer address, or
//! keyed by `X-Forwarded-For` / `X-Real-IP` for deployments behind a trusted
//! reverse proxy.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Governor layer keyed by `K`.
pub type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

fn build<K: KeyExtractor>(key: K, per_second: u64, burst: u32) -> RateLimitLayer<K> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key)
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Creates a rate limiter for read endpoints.
///
/// # Limits
///
/// - **Rate**: 2 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn layer() -> RateLimitLayer<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor, 2, 100)
}

/// [`layer`] keyed by forwarded client IP headers.
pub fn proxied_layer() -> RateLimitLayer<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor, 2, 100)
}

/// Creates a stricter rate limiter for link creation.
///
/// # Limits
///
/// - **Rate**: 1 request per second
/// - **Burst**: 10 requests
pub fn secure_layer() -> RateLimitLayer<PeerIpKeyExtractor> {
    build(PeerIpKeyExtractor, 1, 10)
}

/// [`secure_layer`] keyed by forwarded client IP headers.
pub fn secure_proxied_layer() -> RateLimitLayer<SmartIpKeyExtractor> {
    build(SmartIpKeyExtractor, 1, 10)
}

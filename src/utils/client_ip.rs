//! Client IP extraction for visit metadata.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Determines the client IP recorded with a visit.
///
/// When `behind_proxy` is true the first `X-Forwarded-For` entry (or
/// `X-Real-IP`) is trusted; otherwise only the socket peer address is used.
/// Enable the proxy mode only behind a reverse proxy that overwrites these
/// headers.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded.or(real_ip) {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

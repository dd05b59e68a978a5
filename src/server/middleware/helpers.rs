//! Middleware helper functions

use actix_web::http::header::HeaderMap;
use std::net::SocketAddr;

/// Resolve the originating client address for a request
///
/// Honors the first `X-Forwarded-For` entry when present (the gateway is
/// expected to sit behind a router or load balancer), falling back to the
/// peer address.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Paths excluded from request logging
pub(super) fn should_skip_logging(path: &str) -> bool {
    path == "/health" || path.starts_with("/static")
}

//! Request Gate Middleware
//!
//! The ordered composition applied around every inbound request:
//! size check, admission control, security-header injection, and
//! non-blocking suspicious-pattern observability. Each blocking step
//! short-circuits with a problem response; the observability step only logs.

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use platform::client::client_identity;
use std::sync::Arc;

use crate::domain::window::AdmissionDecision;
use crate::error::GateError;
use crate::infra::memory::InMemoryAdmissionStore;

/// URL substrings that mark a request as suspicious. Logged, never blocked:
/// rejecting on pattern matches invites false-positive outages.
const SUSPICIOUS_PATTERNS: &[&str] = &["..", "<script", "union select", "javascript:", "eval("];

/// Shared state for the gate middleware
#[derive(Clone)]
pub struct GateState {
    pub store: Arc<InMemoryAdmissionStore>,
    /// Maximum declared body size in bytes
    pub max_body_bytes: u64,
}

/// Reject requests whose declared Content-Length exceeds the limit
///
/// Relies on the Content-Length header and never reads the body. A missing
/// or unparseable header lets the request proceed; actual wire-size
/// enforcement is the transport's job.
pub async fn enforce_body_limit(
    State(state): State<GateState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let declared = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    if let Some(length) = declared {
        if length > state.max_body_bytes {
            return Err(GateError::PayloadTooLarge.into_response());
        }
    }

    Ok(next.run(req).await)
}

/// Per-client admission control
///
/// Applies the sliding-window and burst caps keyed by client IP, before the
/// request reaches authentication or any handler.
pub async fn admission(
    State(state): State<GateState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let direct_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let client = client_identity(req.headers(), direct_ip);
    let now_ms = Utc::now().timestamp_millis();

    match state.store.check(client, now_ms) {
        AdmissionDecision::Allowed => Ok(next.run(req).await),
        AdmissionDecision::RateLimited => Err(GateError::RateLimited.into_response()),
        AdmissionDecision::BurstLimited => Err(GateError::BurstLimited.into_response()),
    }
}

/// Inject security headers into every response, success or error
pub async fn security_headers(req: Request<Body>, next: Next) -> Response {
    // CSP is context-sensitive: the interactive docs need inline assets
    let relaxed_csp = req.uri().path().starts_with("/docs");

    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::X_XSS_PROTECTION,
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    let csp = if relaxed_csp {
        "default-src 'self'; script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
         style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
         font-src 'self' https://cdn.jsdelivr.net;"
    } else {
        "default-src 'self'; script-src 'self' 'unsafe-inline'; \
         style-src 'self' 'unsafe-inline'"
    };
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(csp),
    );

    response
}

/// Suspicious-pattern and error-response observability
///
/// Scans the path and query for known attack signatures and logs error
/// responses. Never rejects.
pub async fn observe_suspicious(req: Request<Body>, next: Next) -> Response {
    let direct_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());
    let client = client_identity(req.headers(), direct_ip);

    let method = req.method().clone();
    let target = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    if is_suspicious(&target) {
        tracing::warn!(
            client = %client,
            method = %method,
            target = %target,
            "Suspicious request pattern"
        );
    }

    let response = next.run(req).await;

    if response.status().as_u16() >= 400 {
        tracing::warn!(
            client = %client,
            method = %method,
            target = %target,
            status = response.status().as_u16(),
            "Error response"
        );
    }

    response
}

/// Case-insensitive scan for known attack signatures
fn is_suspicious(target: &str) -> bool {
    let lowered = target.to_lowercase();
    SUSPICIOUS_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suspicious_patterns() {
        assert!(is_suspicious("/api/../etc/passwd"));
        assert!(is_suspicious("/search?q=<script>alert(1)</script>"));
        assert!(is_suspicious("/items?filter=1 UNION SELECT password"));
        assert!(is_suspicious("/redirect?to=JavaScript:alert(1)"));
        assert!(is_suspicious("/run?code=eval(x)"));
    }

    #[test]
    fn test_ordinary_requests_are_clean() {
        assert!(!is_suspicious("/api/wishes"));
        assert!(!is_suspicious("/api/wishes/5/notes?ids=1&ids=2"));
        assert!(!is_suspicious("/api/auth/login"));
    }
}

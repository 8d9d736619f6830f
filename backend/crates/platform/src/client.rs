//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers. Admission
//! control and security logging key on the client IP.

use axum::http::HeaderMap;
use std::net::{IpAddr, Ipv4Addr};

/// Bucket used when no client address can be determined. All such requests
/// share one admission budget, matching the behavior of treating unknown
/// clients as a single identity.
pub const UNKNOWN_CLIENT: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}

/// Resolve the identity used for admission control
///
/// Same as [`extract_client_ip`] but never fails: requests without a
/// determinable address fall into the shared [`UNKNOWN_CLIENT`] bucket.
pub fn client_identity(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> IpAddr {
    extract_client_ip(headers, direct_ip).unwrap_or(UNKNOWN_CLIENT)
}

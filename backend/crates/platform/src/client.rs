//! Client identification utilities
//!
//! Derives a stable, non-reversible key for callers that are not signed in,
//! and pulls the bearer credential out of request headers.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

use crate::crypto::sha256;

/// Client fingerprint derived from request headers and the peer address
#[derive(Debug, Clone)]
pub struct ClientFingerprint {
    /// SHA-256 over `user-agent \n ip`
    pub hash: [u8; 32],
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    /// Original User-Agent string (for logging)
    pub user_agent: Option<String>,
}

impl ClientFingerprint {
    pub fn new(hash: [u8; 32], ip: Option<IpAddr>, user_agent: Option<String>) -> Self {
        Self { hash, ip, user_agent }
    }

    /// Lowercase hex of the first 16 bytes of the hash
    ///
    /// Short enough to store as a voter key, long enough to avoid collisions
    /// between distinct clients.
    pub fn short_hex(&self) -> String {
        hex::encode(&self.hash[..16])
    }

    /// Voter key used for anonymous callers (`fp:<hex>`)
    pub fn voter_key(&self) -> String {
        format!("fp:{}", self.short_hex())
    }
}

/// Extract a client fingerprint
///
/// Returns `None` when neither a User-Agent nor an IP address is available,
/// since nothing would distinguish the caller from any other.
pub fn extract_fingerprint(headers: &HeaderMap, client_ip: Option<IpAddr>) -> Option<ClientFingerprint> {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|ua| !ua.is_empty());

    if user_agent.is_none() && client_ip.is_none() {
        return None;
    }

    let ip_text = client_ip.map(|ip| ip.to_string()).unwrap_or_default();
    let material = format!("{}\n{}", user_agent.unwrap_or_default(), ip_text);

    Some(ClientFingerprint::new(
        sha256(material.as_bytes()),
        client_ip,
        user_agent.map(str::to_string),
    ))
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

/// Extract the credential from an `Authorization: Bearer <token>` header
///
/// Returns `None` when the header is absent. A header that is present but
/// malformed yields `Some("")` so callers can reject it instead of treating
/// the request as anonymous.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?;
    let Ok(text) = value.to_str() else {
        return Some("");
    };
    match text.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") => Some(token.trim()),
        _ => Some(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn ua_headers(ua: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::USER_AGENT, HeaderValue::from_static(ua));
        headers
    }

    #[test]
    fn test_extract_fingerprint() {
        let headers = ua_headers("Mozilla/5.0 Test Browser");
        let fp = extract_fingerprint(&headers, None).unwrap();
        assert_eq!(fp.user_agent.as_deref(), Some("Mozilla/5.0 Test Browser"));
        assert_eq!(fp.short_hex().len(), 32);
        assert!(fp.voter_key().starts_with("fp:"));
    }

    #[test]
    fn test_fingerprint_depends_on_ip() {
        let headers = ua_headers("Mozilla/5.0");
        let a = extract_fingerprint(&headers, Some("10.0.0.1".parse().unwrap())).unwrap();
        let b = extract_fingerprint(&headers, Some("10.0.0.2".parse().unwrap())).unwrap();
        let a2 = extract_fingerprint(&headers, Some("10.0.0.1".parse().unwrap())).unwrap();
        assert_ne!(a.voter_key(), b.voter_key());
        assert_eq!(a.voter_key(), a2.voter_key());
    }

    #[test]
    fn test_extract_fingerprint_nothing_known() {
        assert!(extract_fingerprint(&HeaderMap::new(), None).is_none());
        assert!(extract_fingerprint(&HeaderMap::new(), Some("::1".parse().unwrap())).is_some());
    }

    #[test]
    fn test_extract_client_ip_xff() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("192.168.1.1, 10.0.0.1"),
        );

        let ip = extract_client_ip(&headers, None);
        assert_eq!(ip, Some("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_direct() {
        let headers = HeaderMap::new();
        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(direct)), Some(direct));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer xyz"));
        assert_eq!(extract_bearer_token(&headers), Some("xyz"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9v"));
        assert_eq!(extract_bearer_token(&headers), Some(""));
    }
}

//! Request metadata extraction: host, client IP and user agent.

use crate::AppError;
use axum::http::{HeaderMap, header};
use std::borrow::Cow;
use std::net::SocketAddr;

/// Extracts the `Host` header value used to build short links.
///
/// The port is kept, so `localhost:3000` stays `localhost:3000`.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - The `Host` header is missing or blank
/// - The header value contains invalid UTF-8
pub fn extract_host(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?
        .trim();

    if host.is_empty() {
        return Err(AppError::bad_request(
            "Missing Host header",
            serde_json::json!({}),
        ));
    }

    Ok(host.to_string())
}

/// Resolves the client IP address for a request.
///
/// When `behind_proxy` is set, the first entry of `X-Forwarded-For` wins,
/// then `X-Real-IP`; otherwise, or when neither header is usable, the peer
/// socket address is used.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = real_ip {
            return ip.to_string();
        }
    }

    peer.ip().to_string()
}

/// Returns the `User-Agent` header when present.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// dropping the whole header.
pub fn user_agent(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    headers
        .get(header::USER_AGENT)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "127.0.0.1:12345".parse().unwrap()
    }

    #[test]
    fn test_extract_host_simple() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("example.com"));

        assert_eq!(extract_host(&headers).unwrap(), "example.com");
    }

    #[test]
    fn test_extract_host_keeps_port() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));

        assert_eq!(extract_host(&headers).unwrap(), "localhost:3000");
    }

    #[test]
    fn test_extract_host_missing() {
        let headers = HeaderMap::new();
        assert!(matches!(
            extract_host(&headers),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_extract_host_invalid_utf8() {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_bytes(&[0xFF, 0xFE, 0xFD]) {
            headers.insert(header::HOST, value);
            assert!(extract_host(&headers).is_err());
        }
    }

    #[test]
    fn test_client_ip_uses_peer_by_default() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_ip(&headers, peer(), false), "127.0.0.1");
    }

    #[test]
    fn test_client_ip_behind_proxy_uses_first_forwarded() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_ip(&headers, peer(), true), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_behind_proxy_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", HeaderValue::from_static("198.51.100.1"));

        assert_eq!(client_ip(&headers, peer(), true), "198.51.100.1");
    }

    #[test]
    fn test_client_ip_behind_proxy_without_headers() {
        assert_eq!(client_ip(&HeaderMap::new(), peer(), true), "127.0.0.1");
    }

    #[test]
    fn test_user_agent() {
        let mut headers = HeaderMap::new();
        assert_eq!(user_agent(&headers), None);

        headers.insert(header::USER_AGENT, HeaderValue::from_static("TestBot/1.0"));
        assert_eq!(user_agent(&headers).as_deref(), Some("TestBot/1.0"));
    }

    #[test]
    fn test_user_agent_keeps_non_utf8_text() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_bytes(b"Bot/\xff1.0").unwrap(),
        );

        assert_eq!(user_agent(&headers).as_deref(), Some("Bot/\u{FFFD}1.0"));
    }
}

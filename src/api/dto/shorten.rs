//! DTOs for link shortening and short link lookup.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// A short link together with the id of the link it points at.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLinkResponse {
    pub url: String,
    pub link_id: i64,
}

/// `?linkId=n` query parameter.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkIdQuery {
    #[serde_as(as = "DisplayFromStr")]
    pub link_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_request_rejects_garbage() {
        let req = ShortenRequest {
            url: "not-a-valid-url".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_shorten_request_accepts_url() {
        let req = ShortenRequest {
            url: "https://example.com/a?b=c".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_short_link_response_is_camel_case() {
        let body = serde_json::to_value(ShortLinkResponse {
            url: "https://sho.rt/abc".to_string(),
            link_id: 5,
        })
        .unwrap();

        assert_eq!(body["linkId"], 5);
        assert_eq!(body["url"], "https://sho.rt/abc");
    }
}

//! Target URL validation.
//!
//! Only absolute `http`/`https` URLs with a host can be shortened. The input
//! is validated, never rewritten: the stored URL is byte-identical to what the
//! caller submitted.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,

    #[error("URL must not contain control characters")]
    ControlCharacters,

    #[error("URL must not start or end with whitespace")]
    SurroundingWhitespace,
}

/// Checks that `input` is a well-formed URL that may be shortened.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for empty or blank input
/// - [`UrlValidationError::InvalidFormat`] for anything `url` cannot parse
/// - [`UrlValidationError::UnsupportedProtocol`] for `javascript:`, `ftp:`, `data:` and friends
/// - [`UrlValidationError::MissingHost`] for URLs such as `http:///path`
/// - [`UrlValidationError::ControlCharacters`] and
///   [`UrlValidationError::SurroundingWhitespace`] for input `url` would
///   silently clean up; the stored text must be usable as a `Location` header
pub fn validate_target_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    if input.trim() != input {
        return Err(UrlValidationError::SurroundingWhitespace);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

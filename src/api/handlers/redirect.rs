//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::net::SocketAddr;
use tracing::debug;

use crate::domain::entities::VisitorInfo;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_info::{client_ip, user_agent};

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the link by code
/// 2. Record a visit with the client IP and `User-Agent`
/// 3. Return 302 Found with `Location` set to the stored URL
///
/// The client IP is the peer address, or the forwarded address when the
/// service runs behind a proxy.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist; no visit is recorded.
/// Returns 500 Internal Server Error if the stored URL cannot be sent as a
/// `Location` header.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let visitor = VisitorInfo::new(
        client_ip(&headers, addr, state.behind_proxy),
        user_agent(&headers).as_deref(),
    );

    let url = state.link_service.resolve(&code, visitor).await?;
    let location = HeaderValue::try_from(url).map_err(|e| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "code": code, "reason": e.to_string() }),
        )
    })?;
    debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

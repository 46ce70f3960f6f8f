//! Handlers for link shortening and short link lookup.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    http::HeaderMap,
};
use validator::Validate;

use crate::api::dto::shorten::{LinkIdQuery, ShortLinkResponse, ShortenRequest};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_info::extract_host;

/// Creates a short link for a URL.
///
/// # Endpoint
///
/// `POST /shortener/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// { "url": "https://sho.rt/k3x9a0b1c2d3e", "linkId": 1 }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the body or URL is invalid.
/// Returns 503 Service Unavailable if no free code was found.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let base = short_link_base(&state, &headers)?;
    let link = state.link_service.shorten(&payload.url).await?;

    Ok(Json(ShortLinkResponse {
        url: state.link_service.short_link(&base, &link.short_url),
        link_id: link.id,
    }))
}

/// Returns the short link of an existing link.
///
/// # Endpoint
///
/// `GET /shortener/data?linkId=1`
///
/// # Errors
///
/// Returns 400 Bad Request if `linkId` is missing or not an integer.
/// Returns 404 Not Found if the link doesn't exist.
pub async fn short_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<LinkIdQuery>, QueryRejection>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let Query(params) = params?;

    let base = short_link_base(&state, &headers)?;
    let link = state.link_service.get_link(params.link_id).await?;

    Ok(Json(ShortLinkResponse {
        url: state.link_service.short_link(&base, &link.short_url),
        link_id: link.id,
    }))
}

/// Configured public base URL, or `https://<Host>` of the request.
fn short_link_base(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    match state.public_base_url {
        Some(ref base) => Ok(base.clone()),
        None => Ok(format!("https://{}", extract_host(headers)?)),
    }
}

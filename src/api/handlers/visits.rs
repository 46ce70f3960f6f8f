//! Handlers for visit analytics.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::api::dto::shorten::LinkIdQuery;
use crate::api::dto::visits::{
    TimelineEntry, TimelineQueryParams, VisitorFilterParams, VisitsResponse,
};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the visit count and distinct visitors of a link.
///
/// # Endpoint
///
/// `GET /visits/data?linkId=1`
///
/// # Response
///
/// ```json
/// { "count": 3, "ipAddresses": ["10.0.0.1", "10.0.0.2"], "userAgents": ["curl/8.0", ""] }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `linkId` is malformed.
/// Returns 404 Not Found if the link doesn't exist.
pub async fn visits_data_handler(
    State(state): State<AppState>,
    params: Result<Query<LinkIdQuery>, QueryRejection>,
) -> Result<Json<VisitsResponse>, AppError> {
    let Query(params) = params?;

    let summary = state.visit_service.get_visits(params.link_id).await?;

    Ok(Json(summary.into()))
}

/// Lists the visits of a link, oldest first, optionally limited to a window.
///
/// # Endpoint
///
/// `GET /visits/timeline?linkId=1&lastDays=7`
///
/// # Query Parameters
///
/// - `linkId` (required)
/// - `lastYears`, `lastMonths`, `lastDays`, `lastHours`, `lastMinutes` (optional,
///   non-negative); all present units are subtracted from the current time
///
/// Returns `[]` when the link has no visits in the window.
///
/// # Errors
///
/// Returns 400 Bad Request if a parameter is malformed or negative.
/// Returns 404 Not Found if the link doesn't exist.
pub async fn visits_timeline_handler(
    State(state): State<AppState>,
    params: Result<Query<TimelineQueryParams>, QueryRejection>,
) -> Result<Json<Vec<TimelineEntry>>, AppError> {
    let Query(params) = params?;

    let visits = state
        .visit_service
        .get_timeline(params.link_id, params.window.into())
        .await?;

    Ok(Json(visits.into_iter().map(TimelineEntry::from).collect()))
}

/// Lists the visits of a link made by one exact `(ipAddress, userAgent)` pair.
///
/// # Endpoint
///
/// `GET /visits/filter?linkId=1&ipAddress=10.0.0.1&userAgent=curl/8.0`
///
/// # Errors
///
/// Returns 400 Bad Request if `linkId` or `ipAddress` is missing.
/// Returns 404 Not Found if the link doesn't exist.
pub async fn visits_filter_handler(
    State(state): State<AppState>,
    params: Result<Query<VisitorFilterParams>, QueryRejection>,
) -> Result<Json<Vec<TimelineEntry>>, AppError> {
    let Query(params) = params?;

    let visits = state
        .visit_service
        .get_visits_by_visitor(params.link_id, &params.ip_address, &params.user_agent)
        .await?;

    Ok(Json(visits.into_iter().map(TimelineEntry::from).collect()))
}

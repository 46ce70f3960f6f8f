//! API route configuration.

use crate::api::handlers::{
    short_link_handler, shorten_handler, visits_data_handler, visits_filter_handler,
    visits_timeline_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link creation and lookup.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
/// - `GET  /data`    - Short link for `?linkId=`
pub fn shortener_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/data", get(short_link_handler))
}

/// Visit analytics.
///
/// # Endpoints
///
/// - `GET /data`     - Visit count and distinct visitors
/// - `GET /timeline` - Visits within an optional relative window
/// - `GET /filter`   - Visits by one exact visitor
pub fn visits_routes() -> Router<AppState> {
    Router::new()
        .route("/data", get(visits_data_handler))
        .route("/timeline", get(visits_timeline_handler))
        .route("/filter", get(visits_filter_handler))
}

//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /health`      - Health check
//! - `/shortener/*`      - Link creation and lookup (rate limited)
//! - `/visits/*`         - Visit analytics (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// Rate limiting keys on the forwarded client IP when `state.behind_proxy`
/// is set, otherwise on the peer socket address.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = Router::new()
        .nest("/shortener", api::routes::shortener_routes())
        .nest("/visits", api::routes::visits_routes());

    let api_router = if state.behind_proxy {
        api_router.layer(rate_limit::proxy_layer())
    } else {
        api_router.layer(rate_limit::layer())
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .merge(api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

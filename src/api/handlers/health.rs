//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use std::time::Instant;
use tracing::warn;

use crate::api::dto::health::{HealthChecks, HealthResponse, StoreCheck};
use crate::state::AppState;

/// Reports whether the store answers link and visit queries.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: both count queries succeeded
/// - **503 Service Unavailable**: a query failed; `failedQuery` says which
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "latencyMs": 2, "links": 42, "visits": 1337 }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = check_store(&state).await;
    let healthy = database.is_ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Counts links, then visits, stopping at the first failing query.
async fn check_store(state: &AppState) -> StoreCheck {
    let started = Instant::now();
    let elapsed = |started: Instant| started.elapsed().as_millis() as u64;

    let links = match state.link_service.count_links().await {
        Ok(count) => count,
        Err(e) => {
            warn!(error = %e, "Health check: link count failed");
            return StoreCheck {
                status: "error".to_string(),
                latency_ms: elapsed(started),
                links: None,
                visits: None,
                failed_query: Some("count_links"),
                message: Some(e.to_string()),
            };
        }
    };

    match state.visit_service.count_all().await {
        Ok(visits) => StoreCheck {
            status: "ok".to_string(),
            latency_ms: elapsed(started),
            links: Some(links),
            visits: Some(visits),
            failed_query: None,
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "Health check: visit count failed");
            StoreCheck {
                status: "error".to_string(),
                latency_ms: elapsed(started),
                links: Some(links),
                visits: None,
                failed_query: Some("count_visits"),
                message: Some(e.to_string()),
            }
        }
    }
}

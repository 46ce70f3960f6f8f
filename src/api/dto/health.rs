//! DTOs for health check endpoint.

use serde::Serialize;

/// Overall service health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: StoreCheck,
}

/// Result of counting rows in the link and visit tables.
///
/// `failed_query` names the first query that errored; it is omitted when
/// the store answered both.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCheck {
    pub status: String,
    pub latency_ms: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visits: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_query: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StoreCheck {
    pub fn is_ok(&self) -> bool {
        self.failed_query.is_none()
    }
}

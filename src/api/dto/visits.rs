//! DTOs for visit analytics endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::Visit;
use crate::domain::repositories::VisitSummary;
use crate::domain::timeline::TimelineFilter;

/// Visit count and distinct visitors of a link.
///
/// `ipAddresses[i]` and `userAgents[i]` describe the same visitor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitsResponse {
    pub count: i64,
    pub ip_addresses: Vec<String>,
    pub user_agents: Vec<String>,
}

impl From<VisitSummary> for VisitsResponse {
    fn from(summary: VisitSummary) -> Self {
        Self {
            count: summary.count,
            ip_addresses: summary.ip_addresses,
            user_agents: summary.user_agents,
        }
    }
}

/// One visit in a timeline or visitor listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub date: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: String,
}

impl From<Visit> for TimelineEntry {
    fn from(visit: Visit) -> Self {
        Self {
            date: visit.created_at,
            ip_address: visit.ip_address,
            user_agent: visit.user_agent,
        }
    }
}

/// Relative time window; every field is optional.
///
/// Uses `serde_with` so the values parse when flattened into another query
/// struct. Negative numbers are rejected.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindowParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub last_years: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub last_months: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub last_days: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub last_hours: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub last_minutes: Option<u32>,
}

impl From<TimeWindowParams> for TimelineFilter {
    fn from(params: TimeWindowParams) -> Self {
        Self {
            last_years: params.last_years,
            last_months: params.last_months,
            last_days: params.last_days,
            last_hours: params.last_hours,
            last_minutes: params.last_minutes,
        }
    }
}

/// Query parameters for `GET /visits/timeline`.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineQueryParams {
    #[serde_as(as = "DisplayFromStr")]
    pub link_id: i64,

    #[serde(flatten)]
    pub window: TimeWindowParams,
}

/// Query parameters for `GET /visits/filter`.
///
/// A missing `userAgent` matches visits recorded without one.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorFilterParams {
    #[serde_as(as = "DisplayFromStr")]
    pub link_id: i64,

    pub ip_address: String,

    #[serde(default)]
    pub user_agent: String,
}

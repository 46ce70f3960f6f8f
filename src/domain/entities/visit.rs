//! Visit entity representing a single resolved redirect.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub ip_address: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl Visit {
    /// Creates a new Visit instance.
    pub fn new(
        id: i64,
        link_id: i64,
        ip_address: String,
        user_agent: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            link_id,
            ip_address,
            user_agent,
            created_at,
        }
    }
}

/// Input data for recording a visit.
///
/// `link_id` must reference an existing link; the timestamp is set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub link_id: i64,
    pub ip_address: String,
    pub user_agent: String,
}

/// Request metadata describing who resolved a short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorInfo {
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl VisitorInfo {
    pub fn new(ip_address: impl Into<String>, user_agent: Option<&str>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent: user_agent.map(str::to_string),
        }
    }

    /// Builds the visit record for `link_id`.
    ///
    /// A missing user agent is stored as an empty string.
    pub fn into_new_visit(self, link_id: i64) -> NewVisit {
        NewVisit {
            link_id,
            ip_address: self.ip_address,
            user_agent: self.user_agent.unwrap_or_default(),
        }
    }
}

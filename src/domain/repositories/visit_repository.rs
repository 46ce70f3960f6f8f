//! Repository trait for visit recording and aggregation queries.

use crate::domain::entities::{NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// A distinct `(ip_address, user_agent)` pair seen for a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorFingerprint {
    pub ip_address: String,
    pub user_agent: String,
}

impl VisitorFingerprint {
    pub fn new(ip_address: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip_address: ip_address.into(),
            user_agent: user_agent.into(),
        }
    }
}

/// Aggregated visit data for a single link.
///
/// `ip_addresses` and `user_agents` are parallel arrays built from the
/// visitor fingerprints, so equal positions belong to the same visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitSummary {
    pub count: i64,
    pub ip_addresses: Vec<String>,
    pub user_agents: Vec<String>,
}

impl VisitSummary {
    pub fn from_fingerprints(count: i64, fingerprints: Vec<VisitorFingerprint>) -> Self {
        let (ip_addresses, user_agents) = fingerprints
            .into_iter()
            .map(|f| (f.ip_address, f.user_agent))
            .unzip();

        Self {
            count,
            ip_addresses,
            user_agents,
        }
    }
}

/// Repository interface for visit tracking and analytics.
///
/// All queries are scoped to one link. Existence of the link is checked by
/// the caller through [`crate::domain::repositories::LinkRepository`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Records a new visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including a
    /// `link_id` that no longer references a link.
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Counts all visits of a link.
    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError>;

    /// Returns the distinct visitor fingerprints of a link in first-seen order.
    async fn distinct_visitors(&self, link_id: i64) -> Result<Vec<VisitorFingerprint>, AppError>;

    /// Returns visits created at or after `since` (all visits when `None`),
    /// ordered ascending by creation time.
    async fn timeline(
        &self,
        link_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Visit>, AppError>;

    /// Returns visits matching both `ip_address` and `user_agent` exactly,
    /// ordered ascending by creation time.
    async fn find_by_visitor(
        &self,
        link_id: i64,
        ip_address: &str,
        user_agent: &str,
    ) -> Result<Vec<Visit>, AppError>;

    /// Counts all visits across every link.
    async fn count_all(&self) -> Result<i64, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_fingerprints_keeps_pairs_aligned() {
        let summary = VisitSummary::from_fingerprints(
            3,
            vec![
                VisitorFingerprint::new("10.0.0.1", "curl/8.0"),
                VisitorFingerprint::new("10.0.0.2", ""),
            ],
        );

        assert_eq!(summary.count, 3);
        assert_eq!(summary.ip_addresses, vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(summary.user_agents, vec!["curl/8.0", ""]);
    }

    #[test]
    fn test_summary_without_visitors() {
        let summary = VisitSummary::from_fingerprints(0, vec![]);
        assert_eq!(summary.count, 0);
        assert!(summary.ip_addresses.is_empty());
        assert!(summary.user_agents.is_empty());
    }
}

//! Visit analytics service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{Link, Visit};
use crate::domain::repositories::{LinkRepository, VisitRepository, VisitSummary};
use crate::domain::timeline::TimelineFilter;
use crate::error::AppError;

/// Service for read-only visit aggregation.
///
/// Every query first checks that the link exists, so an unknown link yields
/// [`AppError::NotFound`] while a known link without visits yields empty data.
pub struct VisitService<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> VisitService<L, V> {
    /// Creates a new visit service.
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Returns the visit count and the distinct visitors of a link.
    ///
    /// Visitors are deduplicated by the combined `(ip_address, user_agent)`
    /// pair and listed in first-seen order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_visits(&self, link_id: i64) -> Result<VisitSummary, AppError> {
        self.ensure_link(link_id).await?;

        let (count, visitors) = tokio::try_join!(
            self.visit_repository.count_by_link_id(link_id),
            self.visit_repository.distinct_visitors(link_id),
        )?;

        Ok(VisitSummary::from_fingerprints(count, visitors))
    }

    /// Returns the visits of a link within `filter`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Validation`] if the window is out of range.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_timeline(
        &self,
        link_id: i64,
        filter: TimelineFilter,
    ) -> Result<Vec<Visit>, AppError> {
        self.get_timeline_at(link_id, filter, Utc::now()).await
    }

    /// Same as [`Self::get_timeline`] with an explicit reference time.
    pub async fn get_timeline_at(
        &self,
        link_id: i64,
        filter: TimelineFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Visit>, AppError> {
        self.ensure_link(link_id).await?;

        let since = filter.cutoff(now).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "linkId": link_id }))
        })?;
        debug!(link_id, ?since, "Loading visit timeline");

        self.visit_repository.timeline(link_id, since).await
    }

    /// Returns the visits of a link made by one exact visitor, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_visits_by_visitor(
        &self,
        link_id: i64,
        ip_address: &str,
        user_agent: &str,
    ) -> Result<Vec<Visit>, AppError> {
        self.ensure_link(link_id).await?;

        self.visit_repository
            .find_by_visitor(link_id, ip_address, user_agent)
            .await
    }

    /// Counts visits across all links.
    pub async fn count_all(&self) -> Result<i64, AppError> {
        self.visit_repository.count_all().await
    }

    async fn ensure_link(&self, link_id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "linkId": link_id })))
    }
}

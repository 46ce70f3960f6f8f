//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVisit, Visit};
use crate::domain::repositories::{VisitRepository, VisitorFingerprint};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    ip_address: String,
    user_agent: String,
    created_at: DateTime<Utc>,
}

impl From<VisitRow> for Visit {
    fn from(row: VisitRow) -> Self {
        Visit::new(
            row.id,
            row.link_id,
            row.ip_address,
            row.user_agent,
            row.created_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct FingerprintRow {
    ip_address: String,
    user_agent: String,
}

/// PostgreSQL repository for visit recording and aggregation.
///
/// Aggregations run in SQL; ordering ties on `created_at` are broken by id
/// so results are stable.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (link_id, ip_address, user_agent)
            VALUES ($1, $2, $3)
            RETURNING id, link_id, ip_address, user_agent, created_at
            "#,
        )
        .bind(new_visit.link_id)
        .bind(&new_visit.ip_address)
        .bind(&new_visit.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn distinct_visitors(&self, link_id: i64) -> Result<Vec<VisitorFingerprint>, AppError> {
        let rows = sqlx::query_as::<_, FingerprintRow>(
            r#"
            SELECT ip_address, user_agent
            FROM visits
            WHERE link_id = $1
            GROUP BY ip_address, user_agent
            ORDER BY MIN(id)
            "#,
        )
        .bind(link_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| VisitorFingerprint::new(r.ip_address, r.user_agent))
            .collect())
    }

    async fn timeline(
        &self,
        link_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Visit>, AppError> {
        let rows = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT id, link_id, ip_address, user_agent, created_at
            FROM visits
            WHERE link_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(link_id)
        .bind(since)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Visit::from).collect())
    }

    async fn find_by_visitor(
        &self,
        link_id: i64,
        ip_address: &str,
        user_agent: &str,
    ) -> Result<Vec<Visit>, AppError> {
        let rows = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT id, link_id, ip_address, user_agent, created_at
            FROM visits
            WHERE link_id = $1 AND ip_address = $2 AND user_agent = $3
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(link_id)
        .bind(ip_address)
        .bind(user_agent)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Visit::from).collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

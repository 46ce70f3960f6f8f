#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower::Layer;

use link_shortener::domain::entities::{Link, NewLink, NewVisit, Visit};
use link_shortener::domain::repositories::{LinkRepository, VisitRepository, VisitorFingerprint};
use link_shortener::error::AppError;
use link_shortener::state::AppState;

/// Link store backed by a vector; ids start at 1.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
}

impl InMemoryLinkRepository {
    pub fn insert(&self, url: &str, short_url: &str) -> Link {
        let mut links = self.links.lock().unwrap();
        let link = Link::new(
            links.len() as i64 + 1,
            url.to_string(),
            short_url.to_string(),
            Utc::now(),
        );
        links.push(link.clone());
        link
    }

    pub fn all(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        if self
            .links
            .lock()
            .unwrap()
            .iter()
            .any(|l| l.short_url == new_link.short_url)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "links_short_url_key" }),
            ));
        }

        Ok(self.insert(&new_link.url, &new_link.short_url))
    }

    async fn find_by_short_url(&self, short_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_url == short_url)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().len() as i64)
    }
}

/// Link store whose every call fails like an unreachable database.
pub struct FailingLinkRepository;

#[async_trait]
impl LinkRepository for FailingLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn find_by_short_url(&self, _short_url: &str) -> Result<Option<Link>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Link>, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(AppError::internal("Database error", json!({})))
    }
}

/// Visit store backed by a vector; ids start at 1.
#[derive(Default)]
pub struct InMemoryVisitRepository {
    visits: Mutex<Vec<Visit>>,
}

impl InMemoryVisitRepository {
    /// Stores a visit with an explicit timestamp.
    pub fn seed(&self, link_id: i64, ip: &str, ua: &str, created_at: DateTime<Utc>) -> Visit {
        let mut visits = self.visits.lock().unwrap();
        let visit = Visit::new(
            visits.len() as i64 + 1,
            link_id,
            ip.to_string(),
            ua.to_string(),
            created_at,
        );
        visits.push(visit.clone());
        visit
    }

    pub fn all(&self) -> Vec<Visit> {
        self.visits.lock().unwrap().clone()
    }

    fn for_link(&self, link_id: i64) -> Vec<Visit> {
        let mut visits: Vec<Visit> = self
            .visits
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.link_id == link_id)
            .cloned()
            .collect();
        visits.sort_by_key(|v| (v.created_at, v.id));
        visits
    }
}

#[async_trait]
impl VisitRepository for InMemoryVisitRepository {
    async fn record(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        Ok(self.seed(
            new_visit.link_id,
            &new_visit.ip_address,
            &new_visit.user_agent,
            Utc::now(),
        ))
    }

    async fn count_by_link_id(&self, link_id: i64) -> Result<i64, AppError> {
        Ok(self.for_link(link_id).len() as i64)
    }

    async fn distinct_visitors(&self, link_id: i64) -> Result<Vec<VisitorFingerprint>, AppError> {
        let mut visits = self.for_link(link_id);
        visits.sort_by_key(|v| v.id);

        let mut seen: Vec<VisitorFingerprint> = Vec::new();
        for v in visits {
            let fingerprint = VisitorFingerprint::new(v.ip_address, v.user_agent);
            if !seen.contains(&fingerprint) {
                seen.push(fingerprint);
            }
        }
        Ok(seen)
    }

    async fn timeline(
        &self,
        link_id: i64,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<Visit>, AppError> {
        Ok(self
            .for_link(link_id)
            .into_iter()
            .filter(|v| since.is_none_or(|s| v.created_at >= s))
            .collect())
    }

    async fn find_by_visitor(
        &self,
        link_id: i64,
        ip_address: &str,
        user_agent: &str,
    ) -> Result<Vec<Visit>, AppError> {
        Ok(self
            .for_link(link_id)
            .into_iter()
            .filter(|v| v.ip_address == ip_address && v.user_agent == user_agent)
            .collect())
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        Ok(self.visits.lock().unwrap().len() as i64)
    }
}

/// Application state over in-memory stores, with handles to inspect them.
pub struct TestContext {
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
    pub visits: Arc<InMemoryVisitRepository>,
}

pub fn create_test_state() -> TestContext {
    let links = Arc::new(InMemoryLinkRepository::default());
    let visits = Arc::new(InMemoryVisitRepository::default());

    let link_repository: Arc<dyn LinkRepository> = links.clone();
    let visit_repository: Arc<dyn VisitRepository> = visits.clone();

    TestContext {
        state: AppState::new(link_repository, visit_repository, 13),
        links,
        visits,
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

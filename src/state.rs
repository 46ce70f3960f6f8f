//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, VisitService};
use crate::domain::repositories::{LinkRepository, VisitRepository};

/// Link service over type-erased repositories.
pub type DynLinkService = LinkService<dyn LinkRepository, dyn VisitRepository>;

/// Visit service over type-erased repositories.
pub type DynVisitService = VisitService<dyn LinkRepository, dyn VisitRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub visit_service: Arc<DynVisitService>,
    /// Base for short links; `None` builds it from the request `Host` header.
    pub public_base_url: Option<String>,
    /// Read visitor IPs from forwarding headers.
    pub behind_proxy: bool,
}

impl AppState {
    /// Wires both services over the same repository pair.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        visit_repository: Arc<dyn VisitRepository>,
        code_length: usize,
    ) -> Self {
        let link_service = LinkService::new(link_repository.clone(), visit_repository.clone())
            .with_code_length(code_length);
        let visit_service = VisitService::new(link_repository, visit_repository);

        Self {
            link_service: Arc::new(link_service),
            visit_service: Arc::new(visit_service),
            public_base_url: None,
            behind_proxy: false,
        }
    }

    pub fn with_public_base_url(mut self, base_url: Option<String>) -> Self {
        self.public_base_url = base_url;
        self
    }

    pub fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }
}

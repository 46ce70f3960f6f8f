//! Link creation, lookup and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, VisitorInfo};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code};
use crate::utils::url_validator::validate_target_url;
use serde_json::json;
use tracing::{debug, info, warn};

/// Upper bound on short code generation attempts per shorten request.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating short links and resolving them to their targets.
///
/// Handles URL validation, collision-free code generation, and visit
/// recording on redirect.
pub struct LinkService<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
    code_length: usize,
}

impl<L: LinkRepository + ?Sized, V: VisitRepository + ?Sized> LinkService<L, V> {
    /// Creates a new link service generating codes of the default length.
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    /// Overrides the generated code length.
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length;
        self
    }

    /// Creates a short link for `url`.
    ///
    /// The URL is stored exactly as given. A fresh code is generated for every
    /// call, so shortening the same URL twice yields two links.
    ///
    /// # Code Generation
    ///
    /// - Generates a random base-36 code and checks the store for it
    /// - A taken code, or a unique violation on insert, triggers regeneration
    /// - Gives up after [`MAX_CODE_ATTEMPTS`] attempts
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is malformed; nothing is
    /// read from or written to the store in that case.
    ///
    /// Returns [`AppError::Exhausted`] if every attempt collided.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn shorten(&self, url: &str) -> Result<Link, AppError> {
        validate_target_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "url": url, "reason": e.to_string() }))
        })?;

        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_code(self.code_length);

            if self
                .link_repository
                .find_by_short_url(&code)
                .await?
                .is_some()
            {
                debug!(attempt, "Short code already taken, regenerating");
                metrics::counter!("short_code_collisions_total").increment(1);
                continue;
            }

            let new_link = NewLink {
                url: url.to_string(),
                short_url: code,
            };

            match self.link_repository.create(new_link).await {
                Ok(link) => {
                    info!(link_id = link.id, short_url = %link.short_url, "Link created");
                    metrics::counter!("links_created_total").increment(1);
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, "Short code claimed concurrently, regenerating");
                    metrics::counter!("short_code_collisions_total").increment(1);
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::exhausted(
            "Failed to generate unique code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its target URL and records the visit.
    ///
    /// Lookup and insert are not atomic; every successful call writes exactly
    /// one visit, duplicates included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code. No visit is
    /// recorded in that case.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn resolve(&self, code: &str, visitor: VisitorInfo) -> Result<String, AppError> {
        let link = self
            .link_repository
            .find_by_short_url(code)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "code": code })))?;

        self.visit_repository
            .record(visitor.into_new_visit(link.id))
            .await?;
        metrics::counter!("visits_recorded_total").increment(1);
        debug!(link_id = link.id, "Visit recorded");

        Ok(link.url)
    }

    /// Retrieves a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_link(&self, link_id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "linkId": link_id })))
    }

    /// Counts stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Constructs the full short link from a base URL and code.
    pub fn short_link(&self, base_url: &str, code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), code)
    }
}

//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Shortening, lookup and redirect resolution
//! - [`services::visit_service::VisitService`] - Visit counts, visitors and timelines

pub mod services;

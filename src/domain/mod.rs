//! Domain layer containing business entities and data-access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`timeline`] - Relative time windows for visit timelines
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives `GET /{code}`
//! 2. [`crate::application::services::LinkService::resolve`] looks the link up
//! 3. A [`entities::NewVisit`] is persisted via [`repositories::VisitRepository`]
//! 4. The handler answers with `302 Found`

pub mod entities;
pub mod repositories;
pub mod timeline;

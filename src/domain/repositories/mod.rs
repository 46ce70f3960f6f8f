//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented by concrete
//! repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link creation and lookup
//! - [`VisitRepository`] - Visit recording and aggregation
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod link_repository;
pub mod visit_repository;

pub use link_repository::LinkRepository;
pub use visit_repository::{VisitRepository, VisitSummary, VisitorFingerprint};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;

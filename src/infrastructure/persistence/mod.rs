//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! bound parameters. Schema lives in `migrations/`.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgVisitRepository`] - Visit recording and aggregation queries

pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;

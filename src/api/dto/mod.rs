//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde with camelCase field names; request bodies are
//! checked with validator and query strings go through `serde_with`.

pub mod health;
pub mod shorten;
pub mod visits;

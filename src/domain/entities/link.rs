//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A persisted pairing of an original URL with a unique short code.
///
/// Links are immutable once created and are never deleted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub url: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, url: String, short_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            url,
            short_url,
            created_at,
        }
    }
}

/// Input data for creating a new link.
///
/// The id and creation timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub url: String,
    pub short_url: String,
}

//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A shortened URL mapping
//! - [`Visit`] - A recorded redirect against a link
//!
//! Creation inputs live next to their entity (`NewLink`, `NewVisit`), and
//! [`VisitorInfo`] carries the request metadata captured at redirect time.

pub mod link;
pub mod visit;

pub use link::{Link, NewLink};
pub use visit::{NewVisit, Visit, VisitorInfo};

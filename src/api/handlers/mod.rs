//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod visits;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::{short_link_handler, shorten_handler};
pub use visits::{visits_data_handler, visits_filter_handler, visits_timeline_handler};

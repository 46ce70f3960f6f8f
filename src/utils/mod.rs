//! Utility functions for code generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Random short code generation
//! - [`url_validator`] - Target URL validation
//! - [`request_info`] - Host, client IP and user agent extraction

pub mod code_generator;
pub mod request_info;
pub mod url_validator;

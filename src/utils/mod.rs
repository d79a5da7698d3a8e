//! Utility functions for slug generation, URL validation, and request handling.
//!
//! - [`code_generator`] - Slug generation and validation
//! - [`url_validator`] - Destination URL validation
//! - [`client_ip`] - Client IP extraction from HTTP requests

pub mod client_ip;
pub mod code_generator;
pub mod url_validator;

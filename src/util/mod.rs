//! Utility functions for common operations.
//!
//! - **Link validation**: only http(s) card links are handed to the browser
//! - **Text processing**: Unicode-aware width, truncation and sanitizing

mod text;
mod url_validator;

pub use text::{display_width, sanitize_text, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};

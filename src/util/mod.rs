//! Utility functions shared by the client and the terminal UI.
//!
//! - **URL validation**: checks the task endpoint base URL before any request
//! - **Text processing**: Unicode-aware width handling and control-character
//!   stripping for text that reaches the terminal

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_to_width};
pub use url_validator::{validate_base_url, UrlValidationError};

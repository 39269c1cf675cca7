//! Error types for the library layer.

use std::fmt;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding input validation failures.
#[derive(Debug)]
pub enum SailPointError {
    /// An error from the underlying API client.
    Api(sailpoint_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for SailPointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for SailPointError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sailpoint_api::Error> for SailPointError {
    fn from(e: sailpoint_api::Error) -> Self {
        Self::Api(e)
    }
}

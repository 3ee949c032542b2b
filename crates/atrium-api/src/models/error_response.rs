//! Error response model

use serde::Serialize;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error type identifier (e.g., "not_found", "forbidden")
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorBody {
    /// Create a new error response
    #[inline]
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

//! API Error Types
//!
//! Every failure the transport can produce collapses into [`ApiError`]. The
//! `Display` output is what hooks store and what notifications show.

use thiserror::Error;

/// Fallback message when the backend gives us nothing better
pub const UNKNOWN_API_ERROR: &str = "An unknown API error occurred.";

/// Transport and backend errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-2xx response. The message is the backend's `detail`, the status
    /// reason phrase, or [`UNKNOWN_API_ERROR`], in that order.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (connection refused, DNS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body did not match the expected shape
    #[error("Parse error: {0}")]
    Decode(String),

    /// The request could not be assembled
    #[error("Request build error: {0}")]
    Request(String),
}

impl ApiError {
    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if err.is_builder() {
            ApiError::Request(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

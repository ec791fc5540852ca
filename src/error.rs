// src/error.rs
//! Application error types with structured error handling.
//!
//! Every failure mode in the fetch/convert/enrich pipeline maps to one
//! variant here. Errors surface unchanged to the caller of the public
//! operation; the only local recovery in the whole crate is the comment
//! step's single 404 fallback.

use reqwest::StatusCode;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum FeedError {
    /// No token was supplied. Checked before any network call.
    #[error("GitHub token is not available")]
    MissingToken,

    /// The transport returned a non-success status.
    #[error("HTTP {status}: {status_text}")]
    Http {
        status: StatusCode,
        status_text: String,
    },

    /// A 2xx response whose body carries a GitHub error payload
    /// (a top-level `message` field).
    #[error("GitHub API returned an error: {message}")]
    Service { message: String },

    /// The notifications endpoint answered with something list-shaped
    /// it was not.
    #[error("Notifications list is not an array")]
    NotAnArray,

    #[error("Network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FeedError {
    /// Builds an `Http` error from a status code, deriving the canonical
    /// reason phrase when one exists.
    pub fn http(status: StatusCode) -> Self {
        FeedError::Http {
            status,
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
        }
    }

    /// Whether this is an HTTP error with the given status.
    pub fn is_http_status(&self, code: StatusCode) -> bool {
        matches!(self, FeedError::Http { status, .. } if *status == code)
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = FeedError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_carries_canonical_reason() {
        let err = FeedError::http(StatusCode::IM_A_TEAPOT);
        assert_eq!(err.to_string(), "HTTP 418 I'm a teapot: I'm a teapot");
        assert!(err.is_http_status(StatusCode::IM_A_TEAPOT));
    }

    #[test]
    fn missing_token_message() {
        assert_eq!(
            FeedError::MissingToken.to_string(),
            "GitHub token is not available"
        );
    }

    #[test]
    fn not_an_array_message() {
        assert_eq!(
            FeedError::NotAnArray.to_string(),
            "Notifications list is not an array"
        );
    }
}

// src/types.rs
//! Domain types shared across the crate.

use indexmap::IndexMap;
use std::fmt;

/// Query parameters appended to API requests.
///
/// An `IndexMap` keeps insertion order, so the built query string is
/// deterministic and testable.
pub type QueryParams = IndexMap<String, String>;

/// A GitHub personal access token.
///
/// Constructed without validation — an empty token is representable so the
/// public operation can reject it with `MissingToken` before any network
/// call, matching the documented contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the token as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The `Authorization` header value for GitHub REST requests.
    pub fn header_value(&self) -> String {
        format!("token {}", self.0)
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact the token in display
        if self.0.len() > 4 {
            write!(f, "{}...", &self.0[..4])
        } else {
            write!(f, "...")
        }
    }
}

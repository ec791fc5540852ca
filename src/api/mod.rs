// src/api/mod.rs
//! GitHub API interaction — fetching, caching, converting, and enriching
//! notifications.
//!
//! The module is split between I/O capabilities ([`Transport`],
//! [`ResponseCache`]) and the pipeline stages that consume them
//! (notifications fetch, conversion, enrichment, orchestration).

pub mod cache;
pub mod client;
mod convert;
mod enrich;
mod getter;
mod notifications;

use crate::error::FeedError;
use reqwest::{header::HeaderMap, Method, StatusCode};
use serde_json::Value;

/// The ability to perform one HTTP request.
///
/// This is the crate's only network seam. Business logic depends on this
/// trait, never on HTTP details, so tests substitute in-memory fakes.
/// The transport performs no retries, redirect policy, or timeouts of its
/// own beyond what the underlying client is configured with.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<TransportResponse, FeedError>;
}

/// Method and headers for a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
}

impl RequestOptions {
    /// GET with a GitHub token Authorization header.
    pub fn get_with_token(token: &crate::types::AuthToken) -> Result<Self, FeedError> {
        Self::with_token(Method::GET, token)
    }

    /// Arbitrary method with a GitHub token Authorization header.
    pub fn with_token(method: Method, token: &crate::types::AuthToken) -> Result<Self, FeedError> {
        let mut headers = HeaderMap::new();
        let value = reqwest::header::HeaderValue::from_str(&token.header_value())
            .map_err(|e| FeedError::MissingConfiguration(format!("Invalid token format: {}", e)))?;
        headers.insert(reqwest::header::AUTHORIZATION, value);
        Ok(Self { method, headers })
    }
}

/// A response descriptor: status, reason phrase, and the decoded body.
///
/// The body is decoded exactly once, when the response is read. Anything
/// that is not valid JSON (including an empty body, which GitHub returns
/// for mark-as-read) decodes to `Value::Null`, so there is no
/// single-read stream to accidentally consume twice.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub status_text: String,
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: Value) -> Self {
        Self {
            status,
            status_text: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            body,
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }
}

/// Keyed store mapping a request URL to a previously decoded response
/// body.
///
/// Implementations are consulted before every GET and populated after
/// every successful one. Entries never expire within a batch; lifetime
/// beyond that is the implementation's business. Two concurrent misses
/// for the same URL may both reach the transport — correctness is
/// unaffected, only efficiency.
pub trait ResponseCache: Send + Sync {
    fn lookup(&self, url: &str) -> Option<Value>;
    fn store(&self, url: &str, body: &Value);
}

// Re-export the public interface
pub use cache::{CachedTransport, MemoryCache, NoCache};
pub use client::HttpTransport;
pub use convert::Converter;
pub use enrich::enrich_notifications;
pub use getter::{GetterOptions, NoteGetter};
pub use notifications::{build_notifications_url, fetch_notifications};

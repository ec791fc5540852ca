// src/api/cache.rs
//! In-memory response cache and the cached GET path.
//!
//! The cache stores already-decoded JSON bodies keyed by exact request
//! URL (query string included). Storing decoded values, never response
//! objects, is deliberate: the original implementation of this pipeline
//! hit a body-stream reuse bug when it tried to replay cached raw
//! responses.

use super::{RequestOptions, ResponseCache, Transport};
use crate::error::FeedError;
use crate::types::AuthToken;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;

/// Long-lived shared cache over a concurrent map.
///
/// Safe to share across concurrent enrichment chains. Two chains that
/// miss the same URL simultaneously both reach the transport; the second
/// store wins and the bodies are identical, so the race is benign.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Value>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResponseCache for MemoryCache {
    fn lookup(&self, url: &str) -> Option<Value> {
        let hit = self.entries.get(url).map(|entry| entry.value().clone());
        match hit {
            Some(value) => {
                log::debug!("cache hit for '{}'", url);
                Some(value)
            }
            None => {
                log::debug!("cache miss for '{}'", url);
                None
            }
        }
    }

    fn store(&self, url: &str, body: &Value) {
        log::debug!("caching response for '{}'", url);
        self.entries.insert(url.to_string(), body.clone());
    }
}

/// A cache that never hits, for callers that want every request live.
pub struct NoCache;

impl ResponseCache for NoCache {
    fn lookup(&self, _url: &str) -> Option<Value> {
        None
    }

    fn store(&self, _url: &str, _body: &Value) {}
}

/// A [`Transport`] paired with a [`ResponseCache`] — every GET in the
/// pipeline goes through here.
pub struct CachedTransport {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn ResponseCache>,
}

impl CachedTransport {
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<dyn ResponseCache>) -> Self {
        Self { transport, cache }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Performs a cached GET and returns the decoded body.
    ///
    /// On a cache hit the transport is not invoked. On a miss, a
    /// non-success status fails with [`FeedError::Http`]; a success is
    /// stored under the exact request URL and returned.
    pub async fn get_json(&self, token: &AuthToken, url: &str) -> Result<Value, FeedError> {
        if let Some(cached) = self.cache.lookup(url) {
            return Ok(cached);
        }

        let options = RequestOptions::get_with_token(token)?;
        let response = self.transport.fetch(url, &options).await?;
        if !response.ok() {
            return Err(FeedError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }

        self.cache.store(url, &response.body);
        Ok(response.body)
    }
}

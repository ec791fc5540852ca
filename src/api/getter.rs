// src/api/getter.rs
//! The public notification-getting operation.
//!
//! `NoteGetter` composes the pipeline stages — list fetch, conversion,
//! enrichment — behind one operation, wiring the injected transport and
//! cache capabilities through a single options structure.

use super::cache::{CachedTransport, MemoryCache};
use super::client::HttpTransport;
use super::convert::Converter;
use super::enrich::enrich_notifications;
use super::notifications::fetch_notifications;
use super::{RequestOptions, ResponseCache, Transport};
use crate::error::FeedError;
use crate::model::Notification;
use crate::types::{AuthToken, QueryParams};
use reqwest::Method;
use std::sync::Arc;
use url::Url;

/// Capabilities injected into a [`NoteGetter`], supplied once at
/// construction.
pub struct GetterOptions {
    pub transport: Arc<dyn Transport>,
    pub cache: Arc<dyn ResponseCache>,
}

impl GetterOptions {
    /// Production defaults: a reqwest transport and a shared in-memory
    /// cache.
    pub fn with_defaults() -> Result<Self, FeedError> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new()?),
            cache: Arc::new(MemoryCache::new()),
        })
    }

    /// Replaces the cache capability.
    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = cache;
        self
    }
}

/// Orchestrates fetch → convert → enrich into the single public
/// operation.
pub struct NoteGetter {
    cached: CachedTransport,
    converter: Converter,
}

impl NoteGetter {
    pub fn new(options: GetterOptions) -> Self {
        Self {
            cached: CachedTransport::new(options.transport, options.cache),
            converter: Converter::new(),
        }
    }

    /// Fetches, converts, and enriches the user's notifications.
    ///
    /// `all=true` is forced into the params so GitHub returns read and
    /// unread notifications alike. The stages run in strict sequence —
    /// conversion and enrichment only start once the full list is known —
    /// and the first failure from any stage propagates unchanged. Output
    /// order matches provider order.
    pub async fn get_notifications(
        &self,
        token: &AuthToken,
        params: QueryParams,
    ) -> Result<Vec<Notification>, FeedError> {
        let mut params = params;
        params.insert("all".to_string(), "true".to_string());

        let raw = fetch_notifications(&self.cached, token, &params).await?;
        log::debug!("fetched {} notification records", raw.len());

        let notes = self.converter.convert(raw);
        enrich_notifications(&self.cached, token, notes).await
    }

    /// Marks one notification as read.
    ///
    /// PATCHes the notification's own API URL with the given params and
    /// auth header. Goes straight to the transport — mutations are never
    /// cached.
    pub async fn mark_as_read(
        &self,
        token: &AuthToken,
        note: &Notification,
        params: QueryParams,
    ) -> Result<(), FeedError> {
        if token.is_empty() {
            return Err(FeedError::MissingToken);
        }
        let url = note.notification_url().ok_or_else(|| {
            FeedError::MalformedResponse("Notification record carries no url".to_string())
        })?;
        let url = append_params(url, &params)?;

        log::debug!("marking notification {} as read", note.id);
        let options = RequestOptions::with_token(Method::PATCH, token)?;
        let response = self.cached.transport().fetch(&url, &options).await?;
        if !response.ok() {
            return Err(FeedError::Http {
                status: response.status,
                status_text: response.status_text,
            });
        }
        Ok(())
    }
}

fn append_params(url: &str, params: &QueryParams) -> Result<String, FeedError> {
    let mut url = Url::parse(url)
        .map_err(|e| FeedError::MalformedResponse(format!("Invalid notification url: {}", e)))?;
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_params_preserves_existing_query() {
        let mut params = QueryParams::new();
        params.insert("foo".to_string(), "bar".to_string());
        let url = append_params("https://api.github.com/notifications/threads/1?a=b", &params)
            .unwrap();
        assert_eq!(
            url,
            "https://api.github.com/notifications/threads/1?a=b&foo=bar"
        );
    }

    #[test]
    fn append_params_leaves_bare_urls_untouched_when_empty() {
        let url = append_params(
            "https://api.github.com/notifications/threads/1",
            &QueryParams::new(),
        )
        .unwrap();
        assert_eq!(url, "https://api.github.com/notifications/threads/1");
    }
}

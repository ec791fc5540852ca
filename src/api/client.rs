// src/api/client.rs
//! Pure HTTP transport backed by reqwest.
//!
//! This is a thin wrapper: it sends the request it was given and decodes
//! the body. No caching, no fallback policy, no provider-error
//! interpretation — those live in the layers above.

use super::{RequestOptions, Transport, TransportResponse};
use crate::constants::USER_AGENT;
use crate::error::FeedError;
use reqwest::Client;
use serde_json::Value;

/// The production [`Transport`]: a reqwest client with the crate's
/// user agent baked in.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FeedError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        url: &str,
        options: &RequestOptions,
    ) -> Result<TransportResponse, FeedError> {
        log::debug!("{} {}", options.method, url);

        let response = self
            .client
            .request(options.method.clone(), url)
            .headers(options.headers.clone())
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        // Empty or non-JSON bodies (205 from mark-as-read) become Null.
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        log::debug!("{} {} -> {}", options.method, url, status);
        Ok(TransportResponse::new(status, body))
    }
}

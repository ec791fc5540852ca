// src/api/notifications.rs
//! Fetching and validating the raw notifications list.

use super::cache::CachedTransport;
use crate::constants::NOTIFICATIONS_URL;
use crate::error::FeedError;
use crate::types::{AuthToken, QueryParams};
use serde_json::Value;
use url::Url;

/// Builds the notifications URL with `params` appended as a query string,
/// preserving parameter order.
pub fn build_notifications_url(params: &QueryParams) -> Result<String, FeedError> {
    if params.is_empty() {
        return Ok(NOTIFICATIONS_URL.to_string());
    }
    let url = Url::parse_with_params(NOTIFICATIONS_URL, params.iter())
        .map_err(|e| FeedError::MissingConfiguration(format!("Invalid request URL: {}", e)))?;
    Ok(url.to_string())
}

/// A 2xx body carrying a top-level `message` string is a GitHub error
/// payload, not data.
pub(super) fn check_for_errors(body: &Value) -> Result<(), FeedError> {
    if let Some(message) = body.pointer("/message").and_then(Value::as_str) {
        return Err(FeedError::Service {
            message: message.to_string(),
        });
    }
    Ok(())
}

/// Retrieves the raw notification records for a token and parameter set.
///
/// Fails with [`FeedError::MissingToken`] before any network call when the
/// token is empty. The response must be a JSON array of records; a GitHub
/// error payload fails with [`FeedError::Service`], and any other shape
/// fails with [`FeedError::NotAnArray`].
pub async fn fetch_notifications(
    cached: &CachedTransport,
    token: &AuthToken,
    params: &QueryParams,
) -> Result<Vec<Value>, FeedError> {
    if token.is_empty() {
        return Err(FeedError::MissingToken);
    }

    let url = build_notifications_url(params)?;
    log::debug!("fetching notifications from '{}'", url);

    let body = cached.get_json(token, &url).await?;
    check_for_errors(&body)?;

    match body {
        Value::Array(records) => Ok(records),
        _ => Err(FeedError::NotAnArray),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn url_without_params_is_bare_endpoint() {
        let url = build_notifications_url(&QueryParams::new()).unwrap();
        assert_eq!(url, "https://api.github.com/notifications");
    }

    #[test]
    fn url_appends_params_in_insertion_order() {
        let mut params = QueryParams::new();
        params.insert("participating".to_string(), "true".to_string());
        params.insert("all".to_string(), "true".to_string());
        let url = build_notifications_url(&params).unwrap();
        assert_eq!(
            url,
            "https://api.github.com/notifications?participating=true&all=true"
        );
    }

    #[test]
    fn message_bodies_are_service_errors() {
        let err = check_for_errors(&json!({ "message": "Bad credentials" })).unwrap_err();
        assert!(matches!(err, FeedError::Service { message } if message == "Bad credentials"));
    }

    #[test]
    fn plain_bodies_pass_the_error_check() {
        assert!(check_for_errors(&json!([{ "id": 1 }])).is_ok());
        assert!(check_for_errors(&json!({ "html_url": "H" })).is_ok());
    }
}

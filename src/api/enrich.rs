// src/api/enrich.rs
//! Subject and comment enrichment for converted notifications.
//!
//! Every notification's enrichment chain runs concurrently with the
//! others; within one chain the comment fetch strictly waits on the
//! subject fetch. A single chain's failure rejects the whole batch — the
//! pipeline has no partial-success mode.

use super::cache::CachedTransport;
use super::notifications::check_for_errors;
use crate::error::FeedError;
use crate::model::Notification;
use crate::types::AuthToken;
use reqwest::StatusCode;
use serde_json::Value;

/// Enriches all notifications concurrently, preserving input order.
///
/// Fails with the first error any chain produced.
pub async fn enrich_notifications(
    cached: &CachedTransport,
    token: &AuthToken,
    notifications: Vec<Notification>,
) -> Result<Vec<Notification>, FeedError> {
    futures::future::try_join_all(
        notifications
            .into_iter()
            .map(|note| enrich_notification(cached, token, note)),
    )
    .await
}

/// The two-step enrichment for one notification: subject, then comment.
async fn enrich_notification(
    cached: &CachedTransport,
    token: &AuthToken,
    note: Notification,
) -> Result<Notification, FeedError> {
    let note = fetch_subject(cached, token, note).await?;
    fetch_comment(cached, token, note).await
}

/// Fetches the subject resource named by the raw record.
///
/// A record with no subject URL skips enrichment entirely — the
/// notification resolves unchanged and no fetch is attempted.
async fn fetch_subject(
    cached: &CachedTransport,
    token: &AuthToken,
    mut note: Notification,
) -> Result<Notification, FeedError> {
    let Some(url) = note.raw_subject_url().map(str::to_string) else {
        log::debug!("notification {} has no subject url, skipping", note.id);
        return Ok(note);
    };

    log::debug!("fetching subject data for '{}'", url);
    let subject = cached.get_json(token, &url).await?;
    check_for_errors(&subject)?;

    note.subject_url = html_url(&subject);
    note.api.subject = Some(subject);
    Ok(note)
}

/// Fetches the latest-comment resource, falling back to the subject.
///
/// The candidate URL is `latest_comment_url` when present, else the
/// subject URL — so a subject without comments yields comment fields that
/// mirror the subject. A 404 on the candidate retries once against the
/// subject URL, recovering the case where the comment was deleted but the
/// subject still exists. Any other failure rejects the batch.
async fn fetch_comment(
    cached: &CachedTransport,
    token: &AuthToken,
    mut note: Notification,
) -> Result<Notification, FeedError> {
    let subject_url = note.raw_subject_url().map(str::to_string);
    let candidate = note
        .raw_latest_comment_url()
        .map(str::to_string)
        .or_else(|| subject_url.clone());

    let Some(url) = candidate else {
        log::debug!("notification {} has no comment url, skipping", note.id);
        return Ok(note);
    };

    log::debug!("fetching comment data for '{}'", url);
    let comment = match cached.get_json(token, &url).await {
        Ok(body) => body,
        Err(err) if err.is_http_status(StatusCode::NOT_FOUND) => {
            let Some(fallback) = subject_url.filter(|s| *s != url) else {
                return Err(err);
            };
            log::debug!("comment url '{}' returned 404, falling back to '{}'", url, fallback);
            cached.get_json(token, &fallback).await?
        }
        Err(err) => return Err(err),
    };
    check_for_errors(&comment)?;

    note.comment_url = html_url(&comment);
    note.comment_avatar = comment
        .pointer("/user/avatar_url")
        .and_then(Value::as_str)
        .map(str::to_string);
    note.api.comment = Some(comment);
    Ok(note)
}

fn html_url(body: &Value) -> Option<String> {
    body.pointer("/html_url")
        .and_then(Value::as_str)
        .map(str::to_string)
}

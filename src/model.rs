// src/model.rs
//! The normalized notification entity.
//!
//! A `Notification` is created by the converter with enrichment fields
//! empty, mutated exactly once by its own enrichment chain, and immutable
//! afterwards. The raw provider payloads ride along in `api` so consumers
//! can reach fields the normalized shape does not carry.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One activity item from the GitHub notifications feed, enriched with
/// subject and latest-comment context.
///
/// Serializes with camelCase field names (`repositoryFullName`,
/// `subjectUrl`, ...) so downstream consumers see the same shape the
/// REST payloads use for derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Content-derived identifier, unique within a batch even when the
    /// source record is empty or malformed.
    pub id: String,
    pub unread: bool,
    pub title: String,
    /// The subject type (`Issue`, `PullRequest`, `Release`, ...).
    #[serde(rename = "type")]
    pub kind: String,
    pub updated_at: String,
    pub private: bool,
    pub repository_name: String,
    pub repository_full_name: String,
    pub repository_owner_avatar: String,
    /// `html_url` of the subject resource. `None` until enrichment.
    pub subject_url: Option<String>,
    /// `html_url` of the latest comment, or of the subject when no
    /// distinct comment exists. `None` until enrichment.
    pub comment_url: Option<String>,
    /// Avatar of the latest comment's author. `None` until enrichment.
    pub comment_avatar: Option<String>,
    pub api: ApiPayloads,
}

/// The raw provider payloads backing a notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPayloads {
    /// The notification record exactly as the provider returned it.
    pub notification: Value,
    /// The subject resource body, filled in by enrichment.
    pub subject: Option<Value>,
    /// The latest-comment body (or the subject body when the comment
    /// falls back), filled in by enrichment.
    pub comment: Option<Value>,
}

impl Notification {
    /// The API URL of the notification itself (`api.notification.url`),
    /// used by mark-as-read.
    pub fn notification_url(&self) -> Option<&str> {
        self.api
            .notification
            .pointer("/url")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
    }

    /// The subject resource URL carried by the raw record.
    pub fn raw_subject_url(&self) -> Option<&str> {
        self.api
            .notification
            .pointer("/subject/url")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
    }

    /// The latest-comment URL carried by the raw record.
    pub fn raw_latest_comment_url(&self) -> Option<&str> {
        self.api
            .notification
            .pointer("/subject/latest_comment_url")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn note_with_raw(raw: Value) -> Notification {
        Notification {
            id: "abc".to_string(),
            unread: false,
            title: String::new(),
            kind: String::new(),
            updated_at: String::new(),
            private: false,
            repository_name: String::new(),
            repository_full_name: String::new(),
            repository_owner_avatar: String::new(),
            subject_url: None,
            comment_url: None,
            comment_avatar: None,
            api: ApiPayloads {
                notification: raw,
                subject: None,
                comment: None,
            },
        }
    }

    #[test]
    fn raw_urls_resolve_through_nested_payload() {
        let note = note_with_raw(json!({
            "url": "https://api.github.com/notifications/threads/1",
            "subject": { "url": "S", "latest_comment_url": "C" },
        }));
        assert_eq!(
            note.notification_url(),
            Some("https://api.github.com/notifications/threads/1")
        );
        assert_eq!(note.raw_subject_url(), Some("S"));
        assert_eq!(note.raw_latest_comment_url(), Some("C"));
    }

    #[test]
    fn missing_or_empty_urls_resolve_to_none() {
        let note = note_with_raw(json!({ "subject": { "url": "" } }));
        assert_eq!(note.notification_url(), None);
        assert_eq!(note.raw_subject_url(), None);
        assert_eq!(note.raw_latest_comment_url(), None);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let note = note_with_raw(json!({}));
        let value = serde_json::to_value(&note).unwrap();
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("repositoryFullName").is_some());
        assert!(value.get("subjectUrl").is_some());
        assert!(value.get("type").is_some());
    }
}

// src/api/convert.rs
//! Converting raw notification records into normalized entities.
//!
//! Conversion is total: malformed input becomes defaulted fields, never an
//! error. The converter owns the uniqueness seed that keeps ids distinct
//! when records are missing their source identifiers.

use crate::model::{ApiPayloads, Notification};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Maps raw notification records to [`Notification`] entities.
///
/// Each converter instance carries its own monotonically advancing seed
/// (wall-clock initialized), so unrelated batches never share uniqueness
/// state. Reuse one converter across batches only when cross-batch id
/// uniqueness is intended.
pub struct Converter {
    seed: AtomicU64,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    pub fn new() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            seed: AtomicU64::new(millis),
        }
    }

    /// Converts a batch, assigning every entity a batch-unique id and
    /// initializing enrichment fields to empty.
    pub fn convert(&self, raw_notifications: Vec<Value>) -> Vec<Notification> {
        let mut assigned_ids: HashSet<String> = HashSet::with_capacity(raw_notifications.len());

        raw_notifications
            .into_iter()
            .map(|record| {
                // A null record still produces an entity, backed by {}.
                let record = if record.is_null() {
                    Value::Object(serde_json::Map::new())
                } else {
                    record
                };
                let id = self.assign_id(&record, &mut assigned_ids);
                build_notification(id, record)
            })
            .collect()
    }

    /// Derives the entity id from the record's `id` and `updated_at`,
    /// substituting the seed when the identifier is absent and rehashing
    /// with the seed on collision, so degenerate batches (all-empty
    /// records, duplicated id/timestamp pairs) still get distinct ids.
    fn assign_id(&self, record: &Value, assigned: &mut HashSet<String>) -> String {
        let next_seed = self.seed.fetch_add(1, Ordering::Relaxed);
        let id_part = raw_identifier(record).unwrap_or_else(|| next_seed.to_string());
        let updated_part = record
            .pointer("/updated_at")
            .and_then(Value::as_str)
            .unwrap_or("1");

        let mut digest = hex_digest(&format!("{}{}", id_part, updated_part));
        while assigned.contains(&digest) {
            let salt = self.seed.fetch_add(1, Ordering::Relaxed);
            digest = hex_digest(&format!("{}{}", digest, salt));
        }
        assigned.insert(digest.clone());
        digest
    }
}

fn build_notification(id: String, record: Value) -> Notification {
    Notification {
        id,
        unread: bool_at(&record, "/unread"),
        title: string_at(&record, "/subject/title"),
        kind: string_at(&record, "/subject/type"),
        updated_at: string_at(&record, "/updated_at"),
        private: bool_at(&record, "/private"),
        repository_name: string_at(&record, "/repository/name"),
        repository_full_name: string_at(&record, "/repository/full_name"),
        repository_owner_avatar: string_at(&record, "/repository/owner/avatar_url"),
        subject_url: None,
        comment_url: None,
        comment_avatar: None,
        api: ApiPayloads {
            notification: record,
            subject: None,
            comment: None,
        },
    }
}

/// The record's own identifier, which GitHub sends as a string but older
/// payloads carried as a number.
fn raw_identifier(record: &Value) -> Option<String> {
    match record.pointer("/id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Nested string lookup that defaults to `""` when any step of the path
/// is missing.
fn string_at(record: &Value, path: &str) -> String {
    record
        .pointer(path)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn bool_at(record: &Value, path: &str) -> bool {
    record
        .pointer(path)
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn hex_digest(input: &str) -> String {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn output_length_matches_input_length() {
        let converter = Converter::new();
        let notes = converter.convert(vec![json!({}), json!(null), json!({ "id": "1" })]);
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn empty_records_get_distinct_ids() {
        let converter = Converter::new();
        let notes = converter.convert(vec![json!({}), json!({}), json!({})]);
        assert_ne!(notes[0].id, notes[1].id);
        assert_ne!(notes[1].id, notes[2].id);
        assert_ne!(notes[0].id, notes[2].id);
    }

    #[test]
    fn identical_id_and_timestamp_pairs_get_distinct_ids() {
        let converter = Converter::new();
        let record = json!({ "id": "5", "updated_at": "123456" });
        let notes = converter.convert(vec![record.clone(), record]);
        assert_ne!(notes[0].id, notes[1].id);
    }

    #[test]
    fn valid_records_get_distinct_ids() {
        let converter = Converter::new();
        let notes = converter.convert(vec![
            json!({ "id": 5, "updated_at": "123454" }),
            json!({ "id": 6, "updated_at": "123456" }),
        ]);
        assert_ne!(notes[0].id, notes[1].id);
    }

    #[test]
    fn scalar_fields_are_copied_with_defaults() {
        let converter = Converter::new();
        let notes = converter.convert(vec![json!({
            "unread": true,
            "updated_at": "123456",
            "private": true,
            "subject": { "title": "myTitle", "type": "myType" },
            "repository": {
                "name": "myRepo",
                "full_name": "myFullRepo",
                "owner": { "avatar_url": "ownerAvatarUrl" },
            },
        })]);
        let note = &notes[0];
        assert!(note.unread);
        assert!(note.private);
        assert_eq!(note.title, "myTitle");
        assert_eq!(note.kind, "myType");
        assert_eq!(note.updated_at, "123456");
        assert_eq!(note.repository_name, "myRepo");
        assert_eq!(note.repository_full_name, "myFullRepo");
        assert_eq!(note.repository_owner_avatar, "ownerAvatarUrl");
    }

    #[test]
    fn missing_paths_never_panic_and_default_empty() {
        let converter = Converter::new();
        let notes = converter.convert(vec![json!({ "subject": "not-an-object" })]);
        let note = &notes[0];
        assert_eq!(note.title, "");
        assert_eq!(note.repository_owner_avatar, "");
        assert!(!note.unread);
    }

    #[test]
    fn raw_record_is_retained_and_enrichment_fields_start_empty() {
        let converter = Converter::new();
        let record = json!({ "id": "5", "foo": "bar" });
        let notes = converter.convert(vec![record.clone()]);
        assert_eq!(notes[0].api.notification, record);
        assert_eq!(notes[0].api.subject, None);
        assert_eq!(notes[0].api.comment, None);
        assert_eq!(notes[0].subject_url, None);
        assert_eq!(notes[0].comment_url, None);
        assert_eq!(notes[0].comment_avatar, None);
    }

    #[test]
    fn null_records_are_backed_by_an_empty_object() {
        let converter = Converter::new();
        let notes = converter.convert(vec![json!(null)]);
        assert_eq!(notes[0].api.notification, json!({}));
    }
}

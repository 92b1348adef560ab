use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sender geolocation as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

/// A single corpus record. Every field is optional: the backend populates
/// records unevenly depending on the source app, and absence is a valid,
/// non-error state for every consumer. `message_status` is a free-form
/// string owned by the backend and is displayed verbatim, never matched
/// against a closed set. Unknown fields are retained so a record serializes
/// back without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_of_sender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_of_receiver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_status: Option<String>,
    /// Unix seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_timestamp: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_of_sender: Option<GeoPoint>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Message {
    /// One-line summary for list rendering: sender and the first line of
    /// the content.
    pub fn summary(&self) -> String {
        let sender = self.name_of_sender.as_deref().unwrap_or("Unknown sender");
        let content = self
            .message_content
            .as_deref()
            .unwrap_or("")
            .lines()
            .next()
            .unwrap_or("");
        format!("{sender}: {content}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_record_deserializes() {
        let message: Message =
            serde_json::from_value(serde_json::json!({"message_content": "hi"})).unwrap();
        assert_eq!(message.message_content.as_deref(), Some("hi"));
        assert!(message.name_of_sender.is_none());
        assert!(message.location_of_sender.is_none());
    }

    #[test]
    fn test_unknown_fields_survive_a_round_trip() {
        let raw = serde_json::json!({
            "message_content": "hi",
            "message_status": "delivered-ish",
            "thread_ref": "abc123"
        });
        let message: Message = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(message.extra.get("thread_ref"), raw.get("thread_ref"));
        assert_eq!(serde_json::to_value(&message).unwrap(), raw);
    }

    #[test]
    fn test_summary_uses_first_content_line() {
        let message = Message {
            name_of_sender: Some("alice".to_string()),
            message_content: Some("hello\nsecond line".to_string()),
            ..Message::default()
        };
        assert_eq!(message.summary(), "alice: hello");
    }
}

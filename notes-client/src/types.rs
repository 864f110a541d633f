//! Note types held by the client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A note kept in local storage.
///
/// The id is the creation time in Unix milliseconds, which is not
/// interchangeable with the ids assigned by the notes API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientNote {
    /// Timestamp-derived identifier, unique within one note list
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Inline `data:` URL of the attached image
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

// Older blobs store "" for "no image"
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_image_reads_as_none() {
        let json = r#"{"id":1700000000000,"title":"t","content":"c","image":"","createdAt":"2024-01-01T00:00:00Z"}"#;
        let note: ClientNote = serde_json::from_str(json).unwrap();
        assert_eq!(note.image, None);

        let json = r#"{"id":1,"title":"t","content":"c","createdAt":"2024-01-01T00:00:00Z"}"#;
        let note: ClientNote = serde_json::from_str(json).unwrap();
        assert_eq!(note.image, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let note = ClientNote {
            id: 42,
            title: "t".to_string(),
            content: "c".to_string(),
            image: Some("data:image/png;base64,AA==".to_string()),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], 42);
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["image"], "data:image/png;base64,AA==");
    }
}

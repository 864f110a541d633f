use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted note as returned by the API
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Inline data URL or external URL, stored verbatim
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Note validation failed: {0} is required")]
    MissingField(&'static str),
}

/// Fields of a note that passed creation-time validation
#[derive(Clone, Debug, PartialEq)]
pub struct NewNote {
    title: String,
    content: String,
    image: Option<String>,
}

impl NewNote {
    /// Title and content must be present and non-empty.
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        image: Option<String>,
    ) -> Result<Self, ValidationError> {
        let title = required(title, "title")?;
        let content = required(content, "content")?;

        Ok(Self {
            title,
            content,
            image: image.filter(|i| !i.is_empty()),
        })
    }

    pub fn into_note(self, id: String, created_at: DateTime<Utc>) -> Note {
        Note {
            id,
            title: self.title,
            content: self.content,
            image: self.image,
            created_at,
        }
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

/// Full replacement of the mutable fields of a note.
///
/// No emptiness checks are applied here: an update may overwrite
/// title or content with empty strings.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteUpdate {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

impl NoteUpdate {
    pub fn apply(self, note: &mut Note) {
        note.title = self.title;
        note.content = self.content;
        note.image = self.image;
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image: Option<String>,
}

impl TryFrom<CreateNoteRequest> for NewNote {
    type Error = ValidationError;

    fn try_from(request: CreateNoteRequest) -> Result<Self, Self::Error> {
        NewNote::new(request.title, request.content, request.image)
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
    pub image: Option<String>,
}

impl From<UpdateNoteRequest> for NoteUpdate {
    fn from(request: UpdateNoteRequest) -> Self {
        Self {
            title: request.title,
            content: request.content,
            image: request.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteNoteResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_note_requires_title_and_content() {
        assert_eq!(
            NewNote::new(None, Some("body".into()), None),
            Err(ValidationError::MissingField("title"))
        );
        assert_eq!(
            NewNote::new(Some("title".into()), Some(String::new()), None),
            Err(ValidationError::MissingField("content"))
        );
        assert!(NewNote::new(Some("t".into()), Some("c".into()), None).is_ok());
    }

    #[test]
    fn test_empty_image_is_absent() {
        let note = NewNote::new(Some("t".into()), Some("c".into()), Some(String::new()))
            .unwrap()
            .into_note("id".to_string(), Utc::now());
        assert_eq!(note.image, None);
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = NewNote::new(Some("Groceries".into()), Some("milk".into()), None)
            .unwrap()
            .into_note("abc".to_string(), Utc::now());

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "abc");
        assert!(json.get("createdAt").is_some());
        assert!(json["image"].is_null());
    }

    #[test]
    fn test_update_request_requires_fields() {
        let result = serde_json::from_str::<UpdateNoteRequest>(r#"{"title":"only"}"#);
        assert!(result.is_err());

        let request: UpdateNoteRequest =
            serde_json::from_str(r#"{"title":"","content":"c","image":"data:image/png;base64,AA"}"#)
                .unwrap();
        let update = NoteUpdate::from(request);
        assert_eq!(update.title, "");
        assert_eq!(update.image.as_deref(), Some("data:image/png;base64,AA"));
    }
}

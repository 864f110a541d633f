//! The client-side note list
//!
//! `NoteList` is the whole application state for notes: an ordered sequence,
//! newest first, mirrored to a single blob in [`LocalStorage`] after every
//! change.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::errors::{ClientError, Result};
use crate::storage::LocalStorage;
use crate::types::ClientNote;

/// Well-known storage key holding the serialized note sequence
pub const NOTES_STORAGE_KEY: &str = "notes";

/// Ordered notes mirrored to local storage
#[derive(Debug)]
pub struct NoteList<S: LocalStorage> {
    notes: Vec<ClientNote>,
    storage: S,
}

impl<S: LocalStorage> NoteList<S> {
    /// Load the saved sequence from `storage`.
    ///
    /// A missing, unreadable or unparseable blob is logged and treated as
    /// an empty list.
    pub fn load(storage: S) -> Self {
        let notes = match storage.get_item(NOTES_STORAGE_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<ClientNote>>(&blob) {
                Ok(notes) => {
                    debug!("Loaded {} notes from local storage", notes.len());
                    notes
                },
                Err(e) => {
                    warn!("Error loading notes: {}", e);
                    Vec::new()
                },
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Error reading notes from local storage: {}", e);
                Vec::new()
            },
        };

        Self { notes, storage }
    }

    /// Notes, newest first
    pub fn notes(&self) -> &[ClientNote] {
        &self.notes
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give the storage back, e.g. to reload it
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Prepend a new note and persist the list.
    ///
    /// Returns `Ok(None)` without touching anything when `title` or
    /// `content` is empty.
    pub fn add(
        &mut self,
        title: &str,
        content: &str,
        image: Option<String>,
    ) -> Result<Option<&ClientNote>> {
        if title.is_empty() || content.is_empty() {
            return Ok(None);
        }

        let created_at = Utc::now();
        let note = ClientNote {
            id: self.next_id(created_at.timestamp_millis())?,
            title: title.to_string(),
            content: content.to_string(),
            image: image.filter(|i| !i.is_empty()),
            created_at,
        };

        self.notes.insert(0, note);
        if let Err(e) = self.save() {
            self.notes.remove(0);
            return Err(e);
        }

        info!("Added note {}", self.notes[0].id);
        Ok(self.notes.first())
    }

    /// Remove the note with `id` and persist the rest.
    ///
    /// Returns whether a note was removed. If persisting fails the note
    /// stays in the list.
    pub fn remove(&mut self, id: i64) -> Result<bool> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            debug!("No note with id {} to remove", id);
            return Ok(false);
        };

        let removed = self.notes.remove(index);
        if let Err(e) = self.save() {
            self.notes.insert(index, removed);
            return Err(e);
        }

        info!("Removed note {}", id);
        Ok(true)
    }

    /// Serialize the whole sequence under [`NOTES_STORAGE_KEY`].
    ///
    /// An empty list removes the key, which loads back as an empty list.
    pub fn save(&mut self) -> Result<()> {
        if self.notes.is_empty() {
            return self.storage.remove_item(NOTES_STORAGE_KEY);
        }

        let blob = serde_json::to_string(&self.notes)?;
        self.storage.set_item(NOTES_STORAGE_KEY, &blob)
    }

    // Millisecond timestamps collide when notes are added in quick succession
    fn next_id(&self, now_millis: i64) -> Result<i64> {
        match self.notes.iter().map(|n| n.id).max() {
            Some(max) if max >= now_millis => {
                max.checked_add(1).ok_or(ClientError::NoteIdsExhausted)
            },
            _ => Ok(now_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_load_empty_storage() {
        let list = NoteList::load(MemoryStorage::new());
        assert!(list.is_empty());
    }

    #[test]
    fn test_load_corrupt_blob_is_empty() {
        let mut storage = MemoryStorage::new();
        storage.set_item(NOTES_STORAGE_KEY, "{not json").unwrap();

        let list = NoteList::load(storage);
        assert!(list.is_empty());
    }

    #[test]
    fn test_add_rejects_empty_fields() {
        let mut list = NoteList::load(MemoryStorage::new());

        assert!(list.add("", "content", None).unwrap().is_none());
        assert!(list.add("title", "", None).unwrap().is_none());
        assert!(list.is_empty());
        assert_eq!(list.storage().get_item(NOTES_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_add_prepends_with_unique_ids() {
        let mut list = NoteList::load(MemoryStorage::new());

        list.add("first", "a", None).unwrap();
        list.add("second", "b", None).unwrap();
        list.add("third", "c", None).unwrap();

        let titles: Vec<_> = list.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);

        let mut ids: Vec<_> = list.notes().iter().map(|n| n.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] > w[1]));
    }

    #[derive(Default)]
    struct QuotaExceededStorage {
        inner: MemoryStorage,
    }

    impl LocalStorage for QuotaExceededStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(std::io::Error::other("quota exceeded").into())
        }

        fn remove_item(&mut self, key: &str) -> Result<()> {
            self.inner.remove_item(key)
        }
    }

    #[test]
    fn test_failed_add_leaves_list_unchanged() {
        let mut list = NoteList::load(QuotaExceededStorage::default());

        assert!(list.add("title", "content", None).is_err());
        assert!(list.add("title", "content", None).is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn test_failed_remove_keeps_note() {
        let mut storage = QuotaExceededStorage::default();
        let blob = r#"[
            {"id":2,"title":"b","content":"y","createdAt":"2024-01-02T00:00:00Z"},
            {"id":1,"title":"a","content":"x","createdAt":"2024-01-01T00:00:00Z"}
        ]"#;
        storage.inner.set_item(NOTES_STORAGE_KEY, blob).unwrap();

        let mut list = NoteList::load(storage);
        assert!(list.remove(1).is_err());

        let ids: Vec<_> = list.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_add_after_max_id_fails_without_panicking() {
        let mut storage = MemoryStorage::new();
        let blob = format!(
            r#"[{{"id":{},"title":"t","content":"c","createdAt":"2024-01-01T00:00:00Z"}}]"#,
            i64::MAX
        );
        storage.set_item(NOTES_STORAGE_KEY, &blob).unwrap();

        let mut list = NoteList::load(storage);
        assert_eq!(list.len(), 1);

        let err = list.add("t", "c", None).unwrap_err();
        assert!(matches!(err, ClientError::NoteIdsExhausted));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_removing_last_note_clears_key() {
        let mut list = NoteList::load(MemoryStorage::new());
        let id = list.add("only", "note", None).unwrap().unwrap().id;

        assert!(list.remove(id).unwrap());
        assert_eq!(list.storage().get_item(NOTES_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut list = NoteList::load(MemoryStorage::new());
        list.add("only", "note", None).unwrap();

        assert!(!list.remove(-1).unwrap());
        assert_eq!(list.len(), 1);
    }
}

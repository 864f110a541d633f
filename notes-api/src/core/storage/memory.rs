//! In-memory storage implementation
//!
//! Notes are kept in a HashMap protected by a RwLock.
//! Data is lost when the process exits.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::models::note::{NewNote, Note, NoteUpdate};

use super::traits::{NoteStore, StoreError, StoreResult, new_note_id, parse_note_id};

struct StoredNote {
    note: Note,
    /// Insertion order, breaks ties between equal timestamps
    seq: u64,
}

#[derive(Default)]
struct Inner {
    notes: HashMap<String, StoredNote>,
    next_seq: u64,
}

/// In-memory implementation of NoteStore
///
/// Suitable for development and single-instance deployments.
#[derive(Default)]
pub struct InMemoryNoteStore {
    inner: RwLock<Inner>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn list(&self) -> StoreResult<Vec<Note>> {
        let inner = self.inner.read();

        let mut stored: Vec<&StoredNote> = inner.notes.values().collect();
        stored.sort_by(|a, b| {
            b.note
                .created_at
                .cmp(&a.note.created_at)
                .then(b.seq.cmp(&a.seq))
        });

        Ok(stored.into_iter().map(|s| s.note.clone()).collect())
    }

    async fn get(&self, id: &str) -> StoreResult<Note> {
        parse_note_id(id)?;
        debug!("Looking up note {}", id);

        self.inner
            .read()
            .notes
            .get(id)
            .map(|s| s.note.clone())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn insert(&self, note: NewNote) -> StoreResult<Note> {
        let note = note.into_note(new_note_id(), Utc::now());

        let mut inner = self.inner.write();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.notes.insert(
            note.id.clone(),
            StoredNote {
                note: note.clone(),
                seq,
            },
        );

        info!("Created note: {}", note.id);
        Ok(note)
    }

    async fn update(&self, id: &str, update: NoteUpdate) -> StoreResult<Note> {
        parse_note_id(id)?;

        let mut inner = self.inner.write();
        let stored = inner
            .notes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        update.apply(&mut stored.note);
        debug!("Updated note {}", id);

        Ok(stored.note.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        parse_note_id(id)?;

        match self.inner.write().notes.remove(id) {
            Some(_) => {
                info!("Deleted note: {}", id);
                Ok(())
            },
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

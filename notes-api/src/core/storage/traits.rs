//! Storage trait definitions
//!
//! `NoteStore` is the single contract the HTTP layer talks to.
//! Implementations can be in-memory, Neo4j-backed, or any other storage system.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::note::{NewNote, Note, NoteUpdate};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Invalid note id: {0}")]
    InvalidId(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }

    /// Unknown and malformed ids are the same thing to a caller
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidId(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for note storage backends
///
/// Implementations must be thread-safe (Send + Sync) as they will be
/// shared across request handlers. Concurrent writes to the same note
/// are last-write-wins.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// All notes, newest first
    async fn list(&self) -> StoreResult<Vec<Note>>;

    /// Get a note by ID
    async fn get(&self, id: &str) -> StoreResult<Note>;

    /// Persist a new note with a store-assigned id and creation time
    async fn insert(&self, note: NewNote) -> StoreResult<Note>;

    /// Replace title, content and image; `created_at` is left as is
    async fn update(&self, id: &str, update: NoteUpdate) -> StoreResult<Note>;

    /// Remove a note
    async fn delete(&self, id: &str) -> StoreResult<()>;
}

/// Check that `id` is a store-generated identifier.
pub fn parse_note_id(id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

pub fn new_note_id() -> String {
    Uuid::new_v4().to_string()
}

//! Form state for writing a new note

use std::path::PathBuf;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::{ClientError, Result};
use crate::image::read_image_data_url;
use crate::notes::NoteList;
use crate::storage::LocalStorage;
use crate::types::ClientNote;

/// Title, content and optional image being composed.
///
/// At most one image read is in flight; choosing another file aborts it.
#[derive(Debug, Default)]
pub struct NoteComposer {
    /// Title input
    pub title: String,
    /// Content input
    pub content: String,
    image: Option<String>,
    pending_read: Option<JoinHandle<Result<String>>>,
}

impl NoteComposer {
    /// Create an empty composer
    pub fn new() -> Self {
        Self::default()
    }

    /// Submission is disabled while title or content is empty
    pub fn can_submit(&self) -> bool {
        !self.title.is_empty() && !self.content.is_empty()
    }

    /// The encoded image that the next submission will attach
    pub fn image_preview(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Whether an image read has been started and not yet resolved
    pub fn is_reading_image(&self) -> bool {
        self.pending_read.is_some()
    }

    /// Start reading and encoding `path` in the background.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn select_image(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();

        if let Some(previous) = self.pending_read.take() {
            debug!("Replacing in-flight image read");
            previous.abort();
        }

        self.pending_read = Some(tokio::spawn(
            async move { read_image_data_url(path).await },
        ));
    }

    /// Wait for the in-flight image read and make it the pending image.
    ///
    /// Does nothing when no read is in flight. On failure the previous
    /// image is kept.
    pub async fn resolve_image(&mut self) -> Result<()> {
        let Some(handle) = self.pending_read.take() else {
            return Ok(());
        };

        let data_url = handle
            .await
            .map_err(|e| ClientError::ImageReadAborted(e.to_string()))?
            .inspect_err(|e| warn!("Image read failed: {}", e))?;

        self.image = Some(data_url);
        Ok(())
    }

    /// Drop the pending image and any in-flight read
    pub fn clear_image(&mut self) {
        if let Some(handle) = self.pending_read.take() {
            handle.abort();
        }
        self.image = None;
    }

    /// Add the composed note to `notes` and reset the form.
    ///
    /// An image whose read has not resolved yet is not attached. Returns
    /// `Ok(None)` and leaves the form as is when submission is disabled.
    /// On error the form and `notes` are left as they were.
    pub fn submit<S: LocalStorage>(&mut self, notes: &mut NoteList<S>) -> Result<Option<ClientNote>> {
        if !self.can_submit() {
            return Ok(None);
        }

        let added = notes
            .add(&self.title, &self.content, self.image.clone())?
            .cloned();

        if added.is_some() {
            self.title.clear();
            self.content.clear();
            self.clear_image();
        }

        Ok(added)
    }
}

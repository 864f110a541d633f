//! # Notes client
//!
//! Client-side state for a note-taking UI: an ordered list of notes mirrored
//! to local storage, a composer for new notes, and inline image encoding.
//!
//! ## Features
//!
//! - **Local persistence**: the full note list is saved under one key after every change
//! - **Pluggable storage**: in-memory or file-backed [`LocalStorage`]
//! - **Inline images**: selected files are encoded as `data:` URLs in the background
//! - **Remote API** (feature `remote`): a typed HTTP client for the notes API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notes_client::{FileStorage, NoteList, Result};
//!
//! fn main() -> Result<()> {
//!     let mut notes = NoteList::load(FileStorage::new("./.notes"));
//!     notes.add("Groceries", "eggs, milk", None)?;
//!
//!     for note in notes.notes() {
//!         println!("{} - {}", note.title, note.created_at);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod composer;
mod errors;
/// Inline image encoding
pub mod image;
mod notes;
#[cfg(feature = "remote")]
/// HTTP client for the notes API
pub mod remote;
mod storage;
mod types;

pub use composer::NoteComposer;
pub use errors::{ClientError, Result};
pub use notes::{NOTES_STORAGE_KEY, NoteList};
#[cfg(feature = "remote")]
pub use remote::{ApiNote, NoteApiClient, NoteInput};
pub use storage::{FileStorage, LocalStorage, MemoryStorage};
pub use types::ClientNote;

//! Error types for the notes client

use thiserror::Error;

/// Main error type for the notes client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Reading or writing local storage failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A selected image file could not be read
    #[error("Failed to read image {path}: {source}")]
    ImageReadError {
        /// Path of the image file
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// No unused note id is left above the largest stored one
    #[error("Note ids exhausted")]
    NoteIdsExhausted,

    /// The background image read was aborted or panicked
    #[error("Image read did not complete: {0}")]
    ImageReadAborted(String),

    /// HTTP transport errors talking to the notes API
    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The notes API answered with an error status
    #[error("API error ({status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Message from the `error` field of the response body
        message: String,
    },
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Create a new ApiError
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if the error means the note does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }
}

//! Inline image encoding
//!
//! Images are stored inside notes as `data:<mime>;base64,<payload>` URLs.

use base64::prelude::{BASE64_STANDARD, Engine as _};
use std::path::Path;

use crate::errors::{ClientError, Result};

const FALLBACK_MIME: &str = "application/octet-stream";

/// Guess the MIME type of an image from its file extension
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("ico") => "image/x-icon",
        Some("avif") => "image/avif",
        _ => FALLBACK_MIME,
    }
}

/// Encode raw bytes as a base64 data URL
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes))
}

/// Read a file and encode it as a data URL
pub async fn read_image_data_url(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ClientError::ImageReadError {
            path: path.display().to_string(),
            source,
        })?;

    Ok(encode_data_url(mime_for_path(path), &bytes))
}

//! HTTP client for the notes API
//!
//! Speaks the same contract as the server-side note store: list, get,
//! create, update, delete. Ids here are the API's opaque strings.

use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::errors::{ClientError, Result};

/// A note as stored by the notes API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNote {
    /// Store-assigned identifier
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body
    pub content: String,
    /// Inline data URL or external URL
    pub image: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Body of create and update requests
#[derive(Debug, Clone, Serialize)]
pub struct NoteInput<'a> {
    /// Note title
    pub title: &'a str,
    /// Note body
    pub content: &'a str,
    /// Inline data URL or external URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a running notes API
#[derive(Debug, Clone)]
pub struct NoteApiClient {
    http: Client,
    base_url: String,
}

impl NoteApiClient {
    /// `base_url` is the API prefix, e.g. `http://localhost:5000/api`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use an existing reqwest client
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: &str) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    /// All notes, newest first
    pub async fn list(&self) -> Result<Vec<ApiNote>> {
        let response = self.http.get(self.notes_url()).send().await?;
        parse(response).await
    }

    /// One note by id
    pub async fn get(&self, id: &str) -> Result<ApiNote> {
        let response = self.http.get(self.note_url(id)).send().await?;
        parse(response).await
    }

    /// Create a note
    pub async fn create(&self, note: &NoteInput<'_>) -> Result<ApiNote> {
        let response = self.http.post(self.notes_url()).json(note).send().await?;
        parse(response).await
    }

    /// Replace title, content and image of a note
    pub async fn update(&self, id: &str, note: &NoteInput<'_>) -> Result<ApiNote> {
        let response = self.http.put(self.note_url(id)).json(note).send().await?;
        parse(response).await
    }

    /// Delete a note
    pub async fn delete(&self, id: &str) -> Result<()> {
        let response = self.http.delete(self.note_url(id)).send().await?;
        check(response).await.map(|_| ())
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    debug!("Notes API returned {}: {}", status, message);
    Err(ClientError::api_error(status.as_u16(), message))
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check(response).await?;
    Ok(response.json::<T>().await?)
}

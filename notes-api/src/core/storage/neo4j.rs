//! Neo4j storage implementation
//!
//! ## Schema
//!
//! ```cypher
//! (:Note {
//!     id: String,
//!     title: String,
//!     content: String,
//!     image: String,       // "" when the note has no image
//!     created_at: String   // RFC 3339, UTC, microsecond precision
//! })
//!
//! CREATE CONSTRAINT note_id IF NOT EXISTS FOR (n:Note) REQUIRE n.id IS UNIQUE;
//! ```
//!
//! `created_at` is kept as a fixed-width UTC string so that ordering by the
//! property is chronological.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use neo4rs::{Graph, Node, query};
use std::sync::Arc;
use tracing::{debug, info};

use crate::core::retry::StartupBackoff;
use crate::models::note::{NewNote, Note, NoteUpdate};

use super::traits::{NoteStore, StoreError, StoreResult, new_note_id, parse_note_id};

/// Configuration for Neo4j connection
#[derive(Clone, Debug)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub connect_retries: u32,
}

/// Neo4j client wrapper
#[derive(Clone)]
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Connect, retrying with backoff, and make sure the schema exists
    pub async fn connect(config: Neo4jConfig) -> StoreResult<Self> {
        info!("Connecting to Neo4j at {}", config.uri);

        let graph = StartupBackoff::new(config.connect_retries)
            .connect("Neo4j", || Graph::new(&config.uri, &config.user, &config.password))
            .await
            .map_err(unavailable)?;

        let client = Self {
            graph: Arc::new(graph),
        };
        client.init_schema().await?;

        info!("Connected to Neo4j successfully");
        Ok(client)
    }

    async fn init_schema(&self) -> StoreResult<()> {
        let constraint = "CREATE CONSTRAINT note_id IF NOT EXISTS FOR (n:Note) REQUIRE n.id IS UNIQUE";

        if let Err(e) = self.graph.run(query(constraint)).await {
            // Older servers report an existing constraint as an error
            debug!("Constraint creation result: {:?}", e);
        }

        Ok(())
    }
}

/// Neo4j-backed implementation of NoteStore
pub struct Neo4jNoteStore {
    client: Neo4jClient,
}

impl Neo4jNoteStore {
    pub fn new(client: Neo4jClient) -> Self {
        Self { client }
    }

    async fn fetch_one(&self, q: neo4rs::Query, id: &str) -> StoreResult<Note> {
        let mut result = self.client.graph.execute(q).await.map_err(unavailable)?;

        match result.next().await.map_err(unavailable)? {
            Some(row) => {
                let node: Node = row.get("n").map_err(StoreError::backend)?;
                note_from_node(&node)
            },
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}

#[async_trait]
impl NoteStore for Neo4jNoteStore {
    async fn list(&self) -> StoreResult<Vec<Note>> {
        let q = query(
            "MATCH (n:Note)
            RETURN n
            ORDER BY n.created_at DESC",
        );

        let mut result = self.client.graph.execute(q).await.map_err(unavailable)?;
        let mut notes = Vec::new();

        while let Some(row) = result.next().await.map_err(unavailable)? {
            let node: Node = row.get("n").map_err(StoreError::backend)?;
            notes.push(note_from_node(&node)?);
        }

        Ok(notes)
    }

    async fn get(&self, id: &str) -> StoreResult<Note> {
        parse_note_id(id)?;

        let q = query("MATCH (n:Note {id: $id}) RETURN n").param("id", id);
        self.fetch_one(q, id).await
    }

    async fn insert(&self, note: NewNote) -> StoreResult<Note> {
        let note = note.into_note(new_note_id(), Utc::now());

        let q = query(
            "CREATE (n:Note {
                id: $id,
                title: $title,
                content: $content,
                image: $image,
                created_at: $created_at
            })",
        )
        .param("id", note.id.clone())
        .param("title", note.title.clone())
        .param("content", note.content.clone())
        .param("image", note.image.clone().unwrap_or_default())
        .param("created_at", format_timestamp(&note.created_at));

        self.client.graph.run(q).await.map_err(StoreError::backend)?;

        info!("Created Neo4j note: {}", note.id);
        Ok(note)
    }

    async fn update(&self, id: &str, update: NoteUpdate) -> StoreResult<Note> {
        parse_note_id(id)?;

        let q = query(
            "MATCH (n:Note {id: $id})
            SET n.title = $title,
                n.content = $content,
                n.image = $image
            RETURN n",
        )
        .param("id", id)
        .param("title", update.title)
        .param("content", update.content)
        .param("image", update.image.unwrap_or_default());

        self.fetch_one(q, id).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        parse_note_id(id)?;

        let q = query(
            "MATCH (n:Note {id: $id})
            DETACH DELETE n
            RETURN count(n) as deleted",
        )
        .param("id", id);

        let mut result = self.client.graph.execute(q).await.map_err(unavailable)?;

        let deleted: i64 = match result.next().await.map_err(unavailable)? {
            Some(row) => row.get("deleted").map_err(StoreError::backend)?,
            None => 0,
        };

        if deleted == 0 {
            return Err(StoreError::NotFound(id.to_string()));
        }

        info!("Deleted Neo4j note: {}", id);
        Ok(())
    }
}

fn unavailable(err: neo4rs::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn note_from_node(node: &Node) -> StoreResult<Note> {
    let id: String = node.get("id").map_err(StoreError::backend)?;
    let title: String = node.get("title").map_err(StoreError::backend)?;
    let content: String = node.get("content").map_err(StoreError::backend)?;
    let image: Option<String> = node
        .get::<String>("image")
        .ok()
        .filter(|image| !image.is_empty());

    let created_at: String = node.get("created_at").map_err(StoreError::backend)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(StoreError::backend)?
        .with_timezone(&Utc);

    Ok(Note {
        id,
        title,
        content,
        image,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_sort_chronologically() {
        let earlier = DateTime::parse_from_rfc3339("2024-01-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let later = earlier + chrono::Duration::milliseconds(1500);

        let a = format_timestamp(&earlier);
        let b = format_timestamp(&later);
        assert!(a < b);
        assert_eq!(a.len(), b.len());
    }

    // Integration tests require a running Neo4j instance, reachable through
    // the usual settings (e.g. NOTES__STORAGE__NEO4J__URI)

    #[tokio::test]
    #[ignore]
    async fn test_neo4j_note_lifecycle() {
        let settings = crate::core::config::Settings::new().unwrap();
        let client = Neo4jClient::connect(settings.storage.neo4j_config()).await.unwrap();
        let store = Neo4jNoteStore::new(client);

        let note = NewNote::new(Some("Neo".into()), Some("graph".into()), None).unwrap();
        let note = store.insert(note).await.unwrap();

        let fetched = store.get(&note.id).await.unwrap();
        assert_eq!(fetched.title, "Neo");
        assert_eq!(fetched.image, None);

        store.delete(&note.id).await.unwrap();
        assert!(store.get(&note.id).await.unwrap_err().is_not_found());
    }
}

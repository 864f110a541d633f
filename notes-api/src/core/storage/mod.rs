//! Storage abstractions for the notes API
//!
//! ## Available Backends
//!
//! - `memory`: In-memory storage (default, data is lost on exit)
//! - `neo4j`: Neo4j graph database storage

mod memory;
pub mod neo4j;
mod traits;

pub use memory::*;
pub use neo4j::{Neo4jClient, Neo4jConfig, Neo4jNoteStore};
pub use traits::*;

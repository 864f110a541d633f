use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

use crate::core::storage::Neo4jConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for JSON request bodies; inline images make these large
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Neo4j,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub connect_retries: u32,
    #[serde(default)]
    pub neo4j: Neo4jSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Neo4jSettings {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jSettings {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn neo4j_config(&self) -> Neo4jConfig {
        Neo4jConfig {
            uri: self.neo4j.uri.clone(),
            user: self.neo4j.user.clone(),
            password: self.neo4j.password.clone(),
            connect_retries: self.connect_retries,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::builder()?
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("NOTES").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.max_body_bytes", 50 * 1024 * 1024)?
            .set_default("storage.backend", "memory")?
            .set_default("storage.connect_retries", 5)?
            .set_default("storage.neo4j.uri", "bolt://localhost:7687")?
            .set_default("storage.neo4j.user", "neo4j")?
            .set_default("storage.neo4j.password", "password")
    }

    /// Built-in defaults only, without files or environment
    #[cfg(test)]
    pub fn defaults() -> Self {
        Self::builder()
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .expect("default settings are valid")
    }
}

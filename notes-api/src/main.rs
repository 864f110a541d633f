use anyhow::Result;
use axum::{Router, extract::DefaultBodyLimit};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod core;
mod middleware;
mod models;

use crate::api::notes::NoteState;
use crate::core::{
    config::{Settings, StorageBackend},
    storage::{InMemoryNoteStore, Neo4jClient, Neo4jNoteStore, NoteStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new()?;

    info!(
        "Starting Notes API on {}:{}",
        settings.server.host, settings.server.port
    );

    let store = create_store(&settings).await?;
    let app = create_app(&settings, store);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn create_store(settings: &Settings) -> Result<Arc<dyn NoteStore>> {
    let store: Arc<dyn NoteStore> = match settings.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory note storage");
            Arc::new(InMemoryNoteStore::new())
        },
        StorageBackend::Neo4j => {
            let client = Neo4jClient::connect(settings.storage.neo4j_config()).await?;
            Arc::new(Neo4jNoteStore::new(client))
        },
    };

    Ok(store)
}

fn create_app(settings: &Settings, store: Arc<dyn NoteStore>) -> Router {
    use crate::middleware::{error_handler, request_id};
    use axum::middleware;

    let cors = CorsLayer::permissive();

    api::routes(NoteState { store }).layer(
        ServiceBuilder::new()
            .layer(cors)
            .layer(middleware::from_fn(request_id::add_request_id))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(error_handler::log_errors))
            .layer(DefaultBodyLimit::max(settings.server.max_body_bytes)),
    )
}

use axum::{Router, routing::get};

pub mod notes;
pub mod service;

use notes::NoteState;

/// Prefix shared by all note routes
pub const BASE_PATH: &str = "/api";

pub fn routes(state: NoteState) -> Router {
    let note_routes = Router::new()
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/:id",
            get(notes::get_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
        .with_state(state);

    Router::new()
        .route("/", get(service::describe))
        .route("/health", get(service::health_check))
        .nest(BASE_PATH, note_routes)
}

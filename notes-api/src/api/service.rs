use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub get_all_notes: String,
    pub get_note: String,
    pub create_note: String,
    pub update_note: String,
    pub delete_note: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}

impl ServiceDescriptor {
    pub fn new(base_path: &str) -> Self {
        let notes = format!("{base_path}/notes");
        let note = format!("{notes}/:id");

        Self {
            message: "Notes API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints: Endpoints {
                get_all_notes: format!("GET {notes}"),
                get_note: format!("GET {note}"),
                create_note: format!("POST {notes}"),
                update_note: format!("PUT {note}"),
                delete_note: format!("DELETE {note}"),
            },
        }
    }
}

pub async fn describe() -> impl IntoResponse {
    Json(ServiceDescriptor::new(super::BASE_PATH))
}

pub async fn health_check() -> &'static str {
    "OK"
}

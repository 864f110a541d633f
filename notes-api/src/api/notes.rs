use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    core::storage::NoteStore,
    models::{
        error::{ApiError, ApiResult, Operation},
        note::{CreateNoteRequest, DeleteNoteResponse, NewNote, UpdateNoteRequest},
    },
};

#[derive(Clone)]
pub struct NoteState {
    pub store: Arc<dyn NoteStore>,
}

pub async fn list_notes(State(state): State<NoteState>) -> ApiResult<impl IntoResponse> {
    let notes = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::from_store(Operation::Read, e))?;

    Ok(Json(notes))
}

pub async fn get_note(
    State(state): State<NoteState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let note = state
        .store
        .get(&id)
        .await
        .map_err(|e| ApiError::from_store(Operation::Read, e))?;

    Ok(Json(note))
}

pub async fn create_note(
    State(state): State<NoteState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;
    let new_note = NewNote::try_from(request)?;

    let note = state
        .store
        .insert(new_note)
        .await
        .map_err(|e| ApiError::from_store(Operation::Write, e))?;

    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn update_note(
    State(state): State<NoteState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload?;

    let note = state
        .store
        .update(&id, request.into())
        .await
        .map_err(|e| ApiError::from_store(Operation::Write, e))?;

    Ok(Json(note))
}

pub async fn delete_note(
    State(state): State<NoteState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::from_store(Operation::Delete, e))?;

    Ok(Json(DeleteNoteResponse {
        message: "Note deleted".to_string(),
    }))
}

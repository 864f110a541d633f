use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::storage::StoreError;
use crate::models::note::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Note not found")]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

/// Which kind of route a store failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// list, get
    Read,
    /// insert, update
    Write,
    Delete,
}

impl ApiError {
    /// The one place store failures become HTTP errors.
    ///
    /// | operation | NotFound / InvalidId | anything else |
    /// |-----------|----------------------|---------------|
    /// | Read      | 404                  | 500           |
    /// | Write     | 404                  | 400           |
    /// | Delete    | 404                  | 500           |
    pub fn from_store(operation: Operation, err: StoreError) -> Self {
        if err.is_not_found() {
            return Self::NotFound;
        }

        match operation {
            Operation::Write => Self::BadRequest(err.to_string()),
            Operation::Read | Operation::Delete => Self::Internal(err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(error_response)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let cases = [
            (Operation::Read, StoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (Operation::Read, StoreError::InvalidId("x".into()), StatusCode::NOT_FOUND),
            (
                Operation::Read,
                StoreError::Unavailable("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (Operation::Write, StoreError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (Operation::Write, StoreError::Backend("boom".into()), StatusCode::BAD_REQUEST),
            (Operation::Delete, StoreError::InvalidId("x".into()), StatusCode::NOT_FOUND),
            (
                Operation::Delete,
                StoreError::Backend("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (operation, err, status) in cases {
            assert_eq!(ApiError::from_store(operation, err).status(), status);
        }
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = ApiError::from(ValidationError::MissingField("title"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("title"));
    }
}

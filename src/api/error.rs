//! HTTP error type. Every failure is answered with `{"error": "<message>"}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::board::BoardError;

/// Error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Task not found")]
    pub error: String,
}

#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("{0}")]
    #[diagnostic(code(mrello::api::bad_request))]
    BadRequest(String),

    #[error("{0}")]
    #[diagnostic(code(mrello::api::unauthorized))]
    Unauthorized(String),

    #[error("{0}")]
    #[diagnostic(code(mrello::api::forbidden))]
    Forbidden(String),

    #[error("{0}")]
    #[diagnostic(code(mrello::api::not_found))]
    NotFound(String),

    #[error("{0}")]
    #[diagnostic(code(mrello::api::conflict))]
    Conflict(String),

    #[error("{0}")]
    #[diagnostic(code(mrello::api::internal))]
    Internal(String),

    #[error("Failed to bind {addr}: {source}")]
    #[diagnostic(
        code(mrello::api::bind),
        help("Is another process already listening on this port?")
    )]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    #[diagnostic(code(mrello::api::serve))]
    Serve(#[source] std::io::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Bind { .. } | ApiError::Serve(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<BoardError> for ApiError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::Validation { message } => ApiError::BadRequest(message),
            BoardError::Unauthenticated { message } => ApiError::Unauthorized(message),
            BoardError::Forbidden { message } => ApiError::Forbidden(message),
            e @ BoardError::NotFound { .. } => ApiError::NotFound(e.to_string()),
            BoardError::Conflict { entity_type, .. } if entity_type == "User" => {
                ApiError::Conflict("User already exists".to_string())
            }
            e @ BoardError::Conflict { .. } => ApiError::Conflict(e.to_string()),
            e @ (BoardError::MoveFailed { .. }
            | BoardError::Internal { .. }
            | BoardError::Storage(_)) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

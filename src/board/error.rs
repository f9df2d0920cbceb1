//! Errors raised by board operations.

use miette::Diagnostic;
use thiserror::Error;

use super::moves::MoveError;
use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum BoardError {
    #[error("{message}")]
    #[diagnostic(code(mrello::board::validation))]
    Validation { message: String },

    #[error("{entity_type} not found")]
    #[diagnostic(code(mrello::board::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("{message}")]
    #[diagnostic(code(mrello::board::unauthenticated))]
    Unauthenticated { message: String },

    #[error("{message}")]
    #[diagnostic(code(mrello::board::forbidden))]
    Forbidden { message: String },

    #[error("{entity_type} '{id}' already exists")]
    #[diagnostic(code(mrello::board::conflict))]
    Conflict { entity_type: String, id: String },

    #[error("Failed to move task; reload the board: {message}")]
    #[diagnostic(
        code(mrello::board::move_failed),
        help("The board may have changed underneath this request. Fetch it again before retrying.")
    )]
    MoveFailed { message: String },

    #[error("Internal error: {message}")]
    #[diagnostic(code(mrello::board::internal))]
    Internal { message: String },

    #[error(transparent)]
    #[diagnostic(code(mrello::board::storage))]
    Storage(DbError),
}

impl BoardError {
    pub fn validation(message: impl Into<String>) -> Self {
        BoardError::Validation {
            message: message.into(),
        }
    }
}

impl From<DbError> for BoardError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { entity_type, id } => BoardError::NotFound { entity_type, id },
            DbError::AlreadyExists { entity_type, id } => BoardError::Conflict { entity_type, id },
            DbError::Validation { message } => BoardError::Validation { message },
            other => BoardError::Storage(other),
        }
    }
}

impl From<MoveError> for BoardError {
    fn from(e: MoveError) -> Self {
        BoardError::Validation {
            message: e.to_string(),
        }
    }
}

pub type BoardResult<T> = Result<T, BoardError>;

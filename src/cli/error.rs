use miette::Diagnostic;
use thiserror::Error;

use crate::api::ApiError;
use crate::board::OptimisticError;
use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Failed to connect to API server")]
    #[diagnostic(
        code(mrello::cli::connection_failed),
        help(
            "Is the API server running? Try: mrello serve\nOr set MRELLO_API_URL environment variable to point to the correct server."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from API server: {message}")]
    #[diagnostic(
        code(mrello::cli::invalid_response),
        help(
            "The server returned data in an unexpected format. This might indicate a version mismatch."
        )
    )]
    InvalidResponse { message: String },

    #[error("API error ({status}): {message}")]
    #[diagnostic(code(mrello::cli::api_error))]
    ApiError { status: u16, message: String },

    #[error("No token given")]
    #[diagnostic(
        code(mrello::cli::missing_token),
        help("Run `mrello login` and pass the token with --token or MRELLO_TOKEN.")
    )]
    MissingToken,

    #[error("Move rejected by the server ({status}): {message}")]
    #[diagnostic(
        code(mrello::cli::move_reverted),
        help("The local board was restored to its state before the move.")
    )]
    MoveReverted { status: u16, message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Move(#[from] OptimisticError),

    #[error("Database error: {0}")]
    #[diagnostic(code(mrello::cli::database))]
    Database(#[from] DbError),

    #[error("Failed to create data directory: {0}")]
    #[diagnostic(code(mrello::cli::io))]
    Io(#[from] std::io::Error),

    #[error("API server error: {0}")]
    #[diagnostic(code(mrello::cli::server))]
    Server(#[from] ApiError),
}

impl From<reqwest::Error> for CliError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            CliError::ConnectionFailed { source: e }
        } else {
            CliError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;

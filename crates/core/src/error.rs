//! Unified error types for the jokebook.
//!
//! Transient infrastructure failures (store, provider) are kept distinct
//! from client-facing not-found outcomes so callers can decide what is
//! retryable.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the jokebook server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., missing setup or delivery).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Category unknown to both the store and the provider.
    #[error("NOT_FOUND: category '{0}' not found")]
    NotFound(String),

    /// The provider knows the category but nothing passed filtering.
    #[error("UNFILTERED: no jokes for category '{0}' passed filtering")]
    Unfiltered(String),

    /// Random selection on a store with no jokes.
    #[error("NO_JOKES: no jokes found")]
    NoJokes,

    /// Provider timeout or transport failure. Retryable.
    #[error("PROVIDER_UNAVAILABLE: {0}")]
    ProviderUnavailable(String),

    /// Database operation failed. Retryable.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::NotFound(_) => (-32001, err.to_string()),
            Error::Unfiltered(_) => (-32004, err.to_string()),
            Error::NoJokes => (-32005, err.to_string()),
            Error::ProviderUnavailable(msg) => (-32006, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::MigrationFailed(msg) => (-32002, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

//! Joke provider client error types.

use std::sync::Arc;

/// Errors from the joke provider client.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Invalid category name.
    #[error("invalid category: {0}")]
    InvalidCategory(String),

    /// Invalid amount parameter (must be 1-10).
    #[error("invalid amount: must be 1-10")]
    InvalidAmount,

    /// Configured base URL cannot be used to build a request.
    #[error("invalid provider base URL: {0}")]
    InvalidBaseUrl(String),

    /// Provider answered with a non-success status for the category.
    #[error("provider does not know the category: HTTP {status}")]
    CategoryUnknown { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { ProviderError::Timeout } else { ProviderError::Network(Arc::new(err)) }
    }
}

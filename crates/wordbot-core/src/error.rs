//! Error types for the vocabulary bot
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for bot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the vocabulary bot
#[derive(Error, Debug)]
pub enum Error {
    /// Word provider-related errors
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Provider name
        provider: String,
        /// Error message
        message: String,
    },

    /// The remote model answered, but not with a usable word record
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// History store-related errors
    #[error("History store error: {0}")]
    HistoryStore(String),

    /// Posting client-related errors
    #[error("Poster error: {0}")]
    Poster(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limiting errors
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a history store error
    pub fn history_store(msg: impl Into<String>) -> Self {
        Self::HistoryStore(msg.into())
    }

    /// Create a poster error
    pub fn poster(msg: impl Into<String>) -> Self {
        Self::Poster(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a rate limit error
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Create an HTTP error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Map a non-success HTTP status from a remote API to an error.
    ///
    /// Shared by the provider and poster crates so that every remote
    /// collaborator reports failures the same way.
    pub fn from_status(service: &str, status: u16, body: &str) -> Self {
        match status {
            401 | 403 => Self::auth(format!(
                "{}: invalid credentials or insufficient permissions. Status: {}",
                service, status
            )),
            429 => Self::rate_limited(format!("{}: rate limit exceeded. Status: {}", service, status)),
            500..=599 => Self::provider(
                service,
                format!("server error (transient): {} - {}", status, body),
            ),
            _ => Self::provider(service, format!("request failed: {} - {}", status, body)),
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

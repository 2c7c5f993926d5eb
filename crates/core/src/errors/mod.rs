//! Error types and Result alias for the tracker

use thiserror::Error;

/// Main error type for the tracker
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Session expired")]
    SessionExpired,

    #[error("Lookup failed: {0}")]
    LookupError(String),

    #[error("Store request failed: {0}")]
    StoreError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Malformed document: {0}")]
    ParseError(String),

    #[error("'{name}' on {network} was already added today")]
    DuplicateError { name: String, network: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::NetworkError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connectivity, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No stored credential; the user must log in first
    #[error("No stored credential, login required")]
    MissingCredential,

    /// Authentication required or token rejected
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (client- or server-side precondition)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server rejected the request; message is the server's, verbatim
    #[error("{message}")]
    Server { code: String, message: String },

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message suitable for a user-facing notification. Network-level
    /// failures collapse to a generic message; server messages pass
    /// through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => "Koneksi ke server gagal, coba lagi".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

//! Error types for the membridge adapter
//!
//! Structured error definitions via thiserror, with anyhow used for
//! propagation at the application boundary.

use thiserror::Error;

/// Main error type for membridge operations
#[derive(Error, Debug)]
pub enum MembridgeError {
    /// HTTP transport failure (connection refused, timeout, bad URL)
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status. Display is the backend's
    /// own detail text so it can be forwarded verbatim to the caller.
    #[error("{detail}")]
    Backend { status: u16, detail: String },

    /// Tool name not in the static tool list
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments missing a required field or of the wrong shape
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for membridge operations
pub type Result<T> = std::result::Result<T, MembridgeError>;

impl From<anyhow::Error> for MembridgeError {
    fn from(err: anyhow::Error) -> Self {
        MembridgeError::Other(err.to_string())
    }
}

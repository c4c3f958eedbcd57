//! Server-level error type

use thiserror::Error;

/// Errors surfaced while bootstrapping or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result type for server bootstrap operations
pub type Result<T> = std::result::Result<T, ServerError>;

//! Error types for wellness-flows.

use std::io;

use thiserror::Error;

/// Errors that can occur when reading or writing the local session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported session schema version: {0}")]
    UnsupportedVersion(u64),

    #[error("A session already exists for user {0}")]
    AlreadyEstablished(i64),
}

pub type Result<T> = std::result::Result<T, SessionError>;

//! Common error types for petkeep

use thiserror::Error;

/// Common result type for petkeep operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the petkeep catalog services
#[derive(Error, Debug)]
pub enum Error {
    /// Species schema lookup failed; fatal to a whole batch format run
    #[error("Species schema not found: {0}")]
    SchemaNotFound(String),

    /// Animal record write failed; recoverable per record
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

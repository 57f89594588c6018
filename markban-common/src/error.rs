//! Common error types for markban

use thiserror::Error;

/// Common result type for markban operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the markban crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Fatal store integrity violation (duplicate guids, post-move defects)
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

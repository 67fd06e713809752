//! Error types for Bookclub Core

use thiserror::Error;

/// Result type alias using BookclubError
pub type Result<T> = std::result::Result<T, BookclubError>;

/// Top-level error type for all Bookclub operations
#[derive(Debug, Error)]
pub enum BookclubError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique key is already taken
    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Backend error: {0}")]
    BackendError(String),
}

/// Errors from the catalog and ranked-list providers.
///
/// These never leave the catalog client; they are logged and turned into
/// empty results.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Errors from the text-generation provider
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Missing API key or other unusable settings
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response, rate limit, or an empty completion
    #[error("API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

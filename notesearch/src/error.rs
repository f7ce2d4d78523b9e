//! Error types for notesearch

use thiserror::Error;

/// Notesearch error type
#[derive(Error, Debug)]
pub enum Error {
    /// Two documents in one corpus snapshot share an id
    #[error("Duplicate document id: {0}")]
    DuplicateDocumentId(u64),

    /// Search options could not be parsed or are out of range
    #[error("Invalid search options: {0}")]
    InvalidOptions(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for notesearch operations
pub type Result<T> = std::result::Result<T, Error>;

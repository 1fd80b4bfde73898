//! Error types for PDFRooms.

use thiserror::Error;

/// Common error type for PDFRooms.
#[derive(Error, Debug)]
pub enum PdfRoomsError {
    /// Storage backend error.
    ///
    /// This is a generic error that wraps failures from any storage backend.
    #[error("storage error: {0}")]
    Storage(String),

    /// JSON encoding/decoding error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for PDFRooms operations.
pub type Result<T> = std::result::Result<T, PdfRoomsError>;

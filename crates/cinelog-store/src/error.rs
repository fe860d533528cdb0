use thiserror::Error;
use uuid::Uuid;

use cinelog_shared::ValidationError;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No review with the requested id exists.
    #[error("Review not found: {0}")]
    NotFound(Uuid),

    /// The draft failed the validation gate; nothing was written.
    #[error("Invalid review: {0}")]
    Invalid(#[from] ValidationError),

    /// The backing document could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The collection could not be serialized for writing.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;

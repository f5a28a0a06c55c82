//! Store-specific error types
//!
//! - **`SledError`**: failures from the sled backend
//! - **`DecodeError`** / **`EncodeError`**: stored bytes that bincode cannot read or write
//! - **`Unavailable`**: the backend is disabled

use thiserror::Error;

/// Errors from a key-value store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding stored value: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding value: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Storage is disabled or could not be opened
    #[error("Storage is unavailable")]
    Unavailable,
}

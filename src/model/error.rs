//! Errors raised while loading a page model
//!
//! Only the outer boundary can fail: reading the page file and decoding it.
//! Malformed attribute values inside a well-formed file never error; they
//! resolve to neutral defaults when used.

use thiserror::Error;

/// Page loading errors
#[derive(Debug, Error)]
pub enum PageError {
    /// The page file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The page file is not valid JSON for a page model
    #[error("Invalid page file: {0}")]
    Parse(#[from] serde_json::Error),
}

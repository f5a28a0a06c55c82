//! Topicview - filter, sort and deep-link navigation for static topic indexes
//!
//! This library keeps the interactive state of a topic index page: tag and
//! query filtering, per-list sorting with a remembered preference, category
//! and top-zone folding, fragment deep links and table-of-contents tracking.
//! Rendering goes through the [`view::ViewAdapter`] trait.

use thiserror::Error;

pub mod cli;
pub mod config;
pub mod controller;
pub mod filter;
pub mod model;
pub mod nav;
pub mod sort;
pub mod storage;
pub mod toc;
pub mod view;

#[cfg(test)]
pub mod testing;

pub use controller::IndexController;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TopicviewError {
    /// Preference store error
    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),
    /// Page file error
    #[error("Page error: {0}")]
    PageError(#[from] model::PageError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

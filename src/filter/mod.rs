//! Query and tag filtering
//!
//! [`FilterState`] carries what the visitor selected; [`engine`] turns it into
//! per-item visibility plus the status indicators.
//!
//! # Matching
//!
//! - **Query**: case-insensitive substring of title or summary; empty matches all
//! - **Tags, AND**: every selected tag is on the item
//! - **Tags, OR**: at least one selected tag is on the item
//! - An empty tag selection matches every item in both modes

pub mod engine;
pub mod state;

pub use engine::{FilterDecision, ItemMatch, NO_RESULTS_HINT, apply, decide};
pub use state::{FilterState, TagMode};

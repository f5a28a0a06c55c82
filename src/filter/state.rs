//! Page-lifetime filter state
//!
//! Holds the selected tags, the tag combination mode and the current query.
//! Starts empty and is never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How to combine multiple selected tags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TagMode {
    /// Item must carry ALL selected tags (AND logic)
    #[default]
    All,
    /// Item must carry ANY selected tag (OR logic)
    Any,
}

impl TagMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "AND",
            Self::Any => "OR",
        }
    }

    /// Mode for the state of an "OR" checkbox
    #[must_use]
    pub const fn from_or_checked(checked: bool) -> Self {
        if checked { Self::Any } else { Self::All }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter state shared by every filter operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub(crate) selected_tags: Vec<String>,
    pub tag_mode: TagMode,
    pub query: String,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `tag`
    ///
    /// Returns true if the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.selected_tags.iter().position(|t| t == tag) {
            self.selected_tags.remove(pos);
            false
        } else {
            self.selected_tags.push(tag.to_string());
            true
        }
    }

    /// Deselect every tag
    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
    }

    /// Selected tags in selection order
    #[must_use]
    pub fn selected_tags(&self) -> &[String] {
        &self.selected_tags
    }

    #[must_use]
    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected_tags.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn query_active(&self) -> bool {
        !self.query.is_empty()
    }

    #[must_use]
    pub fn tags_active(&self) -> bool {
        !self.selected_tags.is_empty()
    }

    /// Whether any facet narrows the view
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        self.query_active() || self.tags_active()
    }

    /// Tag facet for one item
    #[must_use]
    pub fn matches_tags(&self, item_tags: &[String]) -> bool {
        if self.selected_tags.is_empty() {
            return true;
        }
        let has = |tag: &String| item_tags.contains(tag);
        match self.tag_mode {
            TagMode::All => self.selected_tags.iter().all(has),
            TagMode::Any => self.selected_tags.iter().any(has),
        }
    }

    /// Query facet for one item, case-insensitive substring match
    #[must_use]
    pub fn matches_query(&self, title: &str, summary: &str) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        title.to_lowercase().contains(&needle) || summary.to_lowercase().contains(&needle)
    }

    /// Readout listing the selected tags, `None` when no tag is selected
    #[must_use]
    pub fn active_tags_label(&self) -> Option<String> {
        if self.selected_tags.is_empty() {
            return None;
        }
        Some(format!("tags: {} ({})", self.selected_tags.join(", "), self.tag_mode))
    }
}

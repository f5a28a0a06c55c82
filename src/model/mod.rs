//! Page model for a topic index
//!
//! The page-generation layer emits a tree of annotated entries grouped into
//! category sections and top-zone folds. This module holds that tree as plain
//! data: an arena of [`Item`]s, the [`ItemList`]s that order them, and the
//! [`Category`] and [`Fold`] containers the lists belong to.
//!
//! Fields are public for direct access. Operations that change visibility,
//! order or fold state live in the engine modules, not here.

pub mod error;
pub mod page_file;

pub use error::PageError;
pub use page_file::{CategoryFile, FoldFile, ItemFile, PageFile};

use serde::{Deserialize, Serialize};

/// Stable handle of an item inside a [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

/// Stable handle of a list inside a [`Page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListId(pub usize);

/// Container a list belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOwner {
    /// Index into [`Page::categories`]
    Category(usize),
    /// Index into [`Page::folds`]
    TopZone(usize),
}

/// One topic entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Anchor identifier, when the entry can be deep-linked
    pub id: Option<String>,
    pub title: String,
    pub summary: String,
    /// Tag set, insertion ordered, no duplicates
    pub tags: Vec<String>,
    /// Raw date attribute, parsed when sorting
    pub date: String,
    /// Raw importance attribute, parsed when sorting
    pub importance: String,
    /// Whether the entry has an attached disclosure region
    pub has_detail: bool,
    pub detail_open: bool,
    pub visible: bool,
    pub list: ListId,
}

/// Ordered entries of one category body or top-zone box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemList {
    pub owner: ListOwner,
    pub items: Vec<ItemId>,
}

/// A named, collapsible section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub collapsed: bool,
}

/// State of a top-zone fold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoldState {
    Collapsed,
    #[default]
    Expanded,
}

impl FoldState {
    #[must_use]
    pub const fn is_expanded(self) -> bool {
        matches!(self, Self::Expanded)
    }
}

/// A separately foldable highlight region above the categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub id: String,
    pub title: String,
    pub state: FoldState,
}

/// Optional controls present on the page
///
/// Anything marked absent is skipped silently by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Controls {
    /// Combined filter status readout
    pub status: bool,
    /// Readout listing the selected tags
    pub active_tags: bool,
    /// "No results" hint
    pub hint: bool,
    /// "Collapse all / expand all" button
    pub toggle_all: bool,
    /// Companion selector next to the table of contents
    pub toc_selector: bool,
    /// Expandable tag bar with its "more" button
    pub tag_bar: bool,
    /// Sort key and direction selectors
    pub sort_selectors: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            status: true,
            active_tags: true,
            hint: true,
            toggle_all: true,
            toc_selector: true,
            tag_bar: true,
            sort_selectors: true,
        }
    }
}

impl Controls {
    /// A page with none of the optional controls
    #[must_use]
    pub const fn none() -> Self {
        Self {
            status: false,
            active_tags: false,
            hint: false,
            toggle_all: false,
            toc_selector: false,
            tag_bar: false,
            sort_selectors: false,
        }
    }
}

/// The whole index page
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub items: Vec<Item>,
    pub lists: Vec<ItemList>,
    pub categories: Vec<Category>,
    pub folds: Vec<Fold>,
    /// Tags that have a selector control on the page
    pub tags: Vec<String>,
    pub controls: Controls,
}

impl Page {
    #[must_use]
    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.0]
    }

    pub fn item_mut(&mut self, id: ItemId) -> &mut Item {
        &mut self.items[id.0]
    }

    /// Iterate items with their handles
    pub fn iter_items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().enumerate().map(|(i, item)| (ItemId(i), item))
    }

    /// Find an entry by its anchor identifier
    #[must_use]
    pub fn find_item(&self, anchor: &str) -> Option<ItemId> {
        self.items
            .iter()
            .position(|item| item.id.as_deref() == Some(anchor))
            .map(ItemId)
    }

    /// Index of the category with the given identifier
    #[must_use]
    pub fn category_index(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    /// Index of the top-zone fold with the given identifier
    #[must_use]
    pub fn fold_index(&self, id: &str) -> Option<usize> {
        self.folds.iter().position(|f| f.id == id)
    }

    /// Container of the list an item belongs to
    #[must_use]
    pub fn owner_of(&self, id: ItemId) -> ListOwner {
        self.lists[self.item(id).list.0].owner
    }

    /// Category identifiers in document order
    #[must_use]
    pub fn category_ids(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.id.clone()).collect()
    }
}

/// Split a comma-separated tag attribute into a tag set
///
/// Entries are trimmed, empties dropped and duplicates removed while keeping
/// the first occurrence's position.
#[must_use]
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

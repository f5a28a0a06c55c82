//! Serialized page description
//!
//! The page-generation layer hands over entries as string attributes. This
//! module mirrors that shape in JSON so a page can be loaded from disk:
//!
//! ```json
//! {
//!   "top_zone": [{ "id": "highlights", "title": "Top picks", "lists": [[{ "title": "..." }]] }],
//!   "categories": [
//!     { "id": "lang", "name": "Languages", "lists": [[{ "id": "42", "tags": "rust,compiler" }]] }
//!   ],
//!   "tags": ["rust", "compiler"],
//!   "controls": { "toc_selector": false }
//! }
//! ```
//!
//! Every attribute is optional. Numbers are accepted where the markup would
//! carry a numeric string.

use super::{
    Category, Controls, Fold, FoldState, Item, ItemId, ItemList, ListId, ListOwner, Page,
    PageError, parse_tag_list,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Attribute value as written by the page generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attr {
    Text(String),
    Number(serde_json::Number),
}

impl Attr {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Tag attribute: comma-separated string or explicit list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagAttr {
    Joined(String),
    List(Vec<String>),
}

impl TagAttr {
    fn into_tags(self) -> Vec<String> {
        match self {
            Self::Joined(raw) => parse_tag_list(&raw),
            Self::List(list) => parse_tag_list(&list.join(",")),
        }
    }
}

/// One entry as emitted by the page generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFile {
    pub id: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub tags: Option<TagAttr>,
    pub date: Option<Attr>,
    #[serde(alias = "imp")]
    pub importance: Option<Attr>,
    /// Whether a disclosure region is attached
    pub detail: bool,
}

impl ItemFile {
    /// Shorthand used by fixtures
    #[must_use]
    pub fn new(title: &str, tags: &str, date: &str, importance: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            tags: Some(TagAttr::Joined(tags.to_string())),
            date: Some(Attr::Text(date.to_string())),
            importance: Some(Attr::Text(importance.to_string())),
            ..Self::default()
        }
    }

    /// Set the anchor identifier
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set the summary text
    #[must_use]
    pub fn with_summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    /// Attach a disclosure region
    #[must_use]
    pub const fn with_detail(mut self) -> Self {
        self.detail = true;
        self
    }
}

/// A category section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryFile {
    pub id: String,
    pub name: String,
    pub lists: Vec<Vec<ItemFile>>,
}

/// A top-zone fold
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldFile {
    pub id: String,
    pub title: String,
    pub lists: Vec<Vec<ItemFile>>,
}

/// A page description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageFile {
    pub top_zone: Vec<FoldFile>,
    pub categories: Vec<CategoryFile>,
    pub tags: Vec<String>,
    pub controls: Controls,
}

impl PageFile {
    /// Parse a page description from JSON text
    ///
    /// # Errors
    ///
    /// Returns `PageError::Parse` if the text is not a valid page description.
    pub fn from_json(text: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a page description file
    ///
    /// # Errors
    ///
    /// Returns `PageError` if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PageError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

fn push_list(page: &mut Page, owner: ListOwner, entries: Vec<ItemFile>) {
    let list = ListId(page.lists.len());
    let mut ids = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = ItemId(page.items.len());
        page.items.push(Item {
            id: entry.id,
            title: entry.title.unwrap_or_default(),
            summary: entry.summary.unwrap_or_default(),
            tags: entry.tags.map(TagAttr::into_tags).unwrap_or_default(),
            date: entry.date.map(Attr::into_string).unwrap_or_default(),
            importance: entry.importance.map(Attr::into_string).unwrap_or_default(),
            has_detail: entry.detail,
            detail_open: false,
            visible: true,
            list,
        });
        ids.push(id);
    }
    page.lists.push(ItemList { owner, items: ids });
}

impl From<PageFile> for Page {
    fn from(file: PageFile) -> Self {
        let mut page = Self {
            tags: file.tags,
            controls: file.controls,
            ..Self::default()
        };

        for fold in file.top_zone {
            let index = page.folds.len();
            page.folds.push(Fold {
                id: fold.id,
                title: fold.title,
                state: FoldState::Expanded,
            });
            for entries in fold.lists {
                push_list(&mut page, ListOwner::TopZone(index), entries);
            }
        }

        for category in file.categories {
            let index = page.categories.len();
            page.categories.push(Category {
                id: category.id,
                name: category.name,
                collapsed: false,
            });
            for entries in category.lists {
                push_list(&mut page, ListOwner::Category(index), entries);
            }
        }

        page
    }
}

//! URL fragment contract
//!
//! Two fragment shapes are reserved for client-side navigation:
//! `#<prefix>-<id>` names an entry and `#cat-<id>` names a category section.
//! Everything else belongs to the browser.

/// Prefix reserved for category fragments
pub const CATEGORY_PREFIX: &str = "cat";

/// A fragment the engine handles
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Entry anchor, holds the part after `#<prefix>-`
    Topic(String),
    /// Category anchor, holds the part after `#cat-`
    Category(String),
}

/// Fragment for a category section
#[must_use]
pub fn category_fragment(id: &str) -> String {
    format!("#{CATEGORY_PREFIX}-{id}")
}

/// Recognizes reserved fragments for one page prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentMatcher {
    prefix: String,
}

impl FragmentMatcher {
    /// Build a matcher for `#<prefix>-*` and `#cat-*`
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Classify a fragment; `None` when it is not reserved
    #[must_use]
    pub fn parse(&self, hash: &str) -> Option<Fragment> {
        let name = hash.strip_prefix('#')?;
        let rest_after = |prefix: &str| {
            name.strip_prefix(prefix)
                .and_then(|r| r.strip_prefix('-'))
                .filter(|r| !r.is_empty())
                .map(String::from)
        };
        rest_after(CATEGORY_PREFIX)
            .map(Fragment::Category)
            .or_else(|| rest_after(&self.prefix).map(Fragment::Topic))
    }

    /// Fragment for an entry anchor
    #[must_use]
    pub fn topic_fragment(&self, id: &str) -> String {
        format!("#{}-{id}", self.prefix)
    }
}

//! Deep links, category collapse and top-zone folds
//!
//! [`Navigator`] owns the navigation-side state: the fragment contract for
//! the current page prefix, the viewport width used by the fold accordion,
//! the global "all categories collapsed" flag and the next-frame scroll slot.
//!
//! # Resolving a fragment
//!
//! ```text
//! #<prefix>-<id> ──► entry exists? ──no──► NotHandled (nothing changes)
//!                        │yes
//!                        ├─ expand its category
//!                        ├─ force it visible (filters notwithstanding)
//!                        ├─ open its disclosure region
//!                        ├─ expand its top-zone fold (accordion rule applies)
//!                        └─ schedule smooth scroll for the next frame
//!
//! #cat-<id> ─────► section exists? ──no──► NotHandled
//!                        │yes
//!                        ├─ expand it
//!                        └─ schedule smooth scroll for the next frame
//! ```

pub mod fold;
pub mod fragment;
pub mod scheduler;

pub use fold::MOBILE_BREAKPOINT;
pub use fragment::{CATEGORY_PREFIX, Fragment, FragmentMatcher, category_fragment};
pub use scheduler::{FrameScheduler, ScrollRequest, ScrollTarget};

use crate::model::{FoldState, ItemId, ListOwner, Page};
use crate::view::ViewAdapter;
use tracing::debug;

/// Toggle-all label while categories are expanded
pub const COLLAPSE_ALL_LABEL: &str = "Collapse all";

/// Toggle-all label while categories are collapsed
pub const EXPAND_ALL_LABEL: &str = "Expand all";

/// Outcome of resolving a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The engine navigated; the caller suppresses the default jump
    Handled,
    /// Not a reserved fragment or no such target; the browser keeps it
    NotHandled,
}

impl Resolution {
    #[must_use]
    pub const fn is_handled(self) -> bool {
        matches!(self, Self::Handled)
    }
}

/// Navigation state for one page
#[derive(Debug, Clone)]
pub struct Navigator {
    matcher: FragmentMatcher,
    breakpoint: u32,
    viewport_width: Option<u32>,
    categories_collapsed: bool,
    frames: FrameScheduler,
}

impl Navigator {
    #[must_use]
    pub fn new(prefix: &str, breakpoint: u32) -> Self {
        Self {
            matcher: FragmentMatcher::new(prefix),
            breakpoint,
            viewport_width: None,
            categories_collapsed: false,
            frames: FrameScheduler::new(),
        }
    }

    #[must_use]
    pub const fn matcher(&self) -> &FragmentMatcher {
        &self.matcher
    }

    /// Switch to another page prefix
    pub fn set_prefix(&mut self, prefix: &str) {
        self.matcher = FragmentMatcher::new(prefix);
    }

    pub const fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = Some(width);
    }

    /// Whether folds currently behave as an accordion
    #[must_use]
    pub const fn is_single_open(&self) -> bool {
        fold::is_single_open(self.viewport_width, self.breakpoint)
    }

    #[must_use]
    pub const fn categories_collapsed(&self) -> bool {
        self.categories_collapsed
    }

    /// Label describing what the toggle-all control does next
    #[must_use]
    pub const fn toggle_all_label(&self) -> &'static str {
        if self.categories_collapsed {
            EXPAND_ALL_LABEL
        } else {
            COLLAPSE_ALL_LABEL
        }
    }

    #[must_use]
    pub const fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    /// Resolve a fragment against the page
    pub fn resolve_hash(
        &mut self,
        hash: &str,
        page: &mut Page,
        view: &mut dyn ViewAdapter,
    ) -> Resolution {
        let Some(fragment) = self.matcher.parse(hash) else {
            debug!(hash, "fragment not reserved");
            return Resolution::NotHandled;
        };

        match fragment {
            Fragment::Topic(anchor) => match page.find_item(&anchor) {
                Some(id) => {
                    self.reveal_item(id, page, view);
                    Resolution::Handled
                }
                None => {
                    debug!(hash, "no entry for fragment");
                    Resolution::NotHandled
                }
            },
            Fragment::Category(cat) => match page.category_index(&cat) {
                Some(index) => {
                    expand_category(page, index, view);
                    self.schedule(ScrollTarget::Category(cat));
                    Resolution::Handled
                }
                None => {
                    debug!(hash, "no category for fragment");
                    Resolution::NotHandled
                }
            },
        }
    }

    fn reveal_item(&mut self, id: ItemId, page: &mut Page, view: &mut dyn ViewAdapter) {
        let owner = page.owner_of(id);
        if let ListOwner::Category(index) = owner {
            expand_category(page, index, view);
        }

        let item = page.item_mut(id);
        item.visible = true;
        view.set_item_visible(id, true);
        if item.has_detail && !item.detail_open {
            item.detail_open = true;
            view.set_detail_open(id, true);
        }

        if let ListOwner::TopZone(index) = owner {
            self.set_fold(page, index, FoldState::Expanded, view);
        }

        debug!(item = id.0, "entry revealed");
        self.schedule(ScrollTarget::Item(id));
    }

    fn schedule(&mut self, target: ScrollTarget) {
        if let Some(old) = self.frames.schedule(ScrollRequest::smooth(target)) {
            debug!(superseded = ?old.target, "pending scroll superseded");
        }
    }

    /// Run the pending next-frame scroll, if any
    pub fn run_frame(&mut self, view: &mut dyn ViewAdapter) -> Option<ScrollRequest> {
        let request = self.frames.take()?;
        view.scroll_into_view(&request);
        Some(request)
    }

    /// Move one fold to `state`, applying the accordion rule
    pub fn set_fold(
        &self,
        page: &mut Page,
        index: usize,
        state: FoldState,
        view: &mut dyn ViewAdapter,
    ) {
        let changes = fold::transitions(&page.folds, index, state, self.is_single_open());
        apply_fold_changes(page, &changes, view);
    }

    /// Flip one fold; unknown folds are ignored
    pub fn toggle_fold(&self, page: &mut Page, id: &str, view: &mut dyn ViewAdapter) {
        let Some(index) = page.fold_index(id) else {
            return;
        };
        let target = if page.folds[index].state.is_expanded() {
            FoldState::Collapsed
        } else {
            FoldState::Expanded
        };
        self.set_fold(page, index, target, view);
    }

    /// Collapse every top-zone fold
    pub fn collapse_all_folds(&self, page: &mut Page, view: &mut dyn ViewAdapter) {
        let changes = fold::collapse_all(&page.folds);
        apply_fold_changes(page, &changes, view);
    }

    /// Flip one category; returns false for an unknown identifier
    pub fn toggle_cat(&self, page: &mut Page, id: &str, view: &mut dyn ViewAdapter) -> bool {
        let Some(index) = page.category_index(id) else {
            return false;
        };
        let category = &mut page.categories[index];
        category.collapsed = !category.collapsed;
        view.set_category_collapsed(&category.id, category.collapsed);
        true
    }

    /// Flip the global flag and apply it to every category
    pub fn toggle_all_cats(&mut self, page: &mut Page, view: &mut dyn ViewAdapter) {
        self.categories_collapsed = !self.categories_collapsed;
        for category in &mut page.categories {
            category.collapsed = self.categories_collapsed;
            view.set_category_collapsed(&category.id, category.collapsed);
        }
        if page.controls.toggle_all {
            view.set_toggle_all_label(self.toggle_all_label());
        }
    }
}

fn expand_category(page: &mut Page, index: usize, view: &mut dyn ViewAdapter) {
    let category = &mut page.categories[index];
    if category.collapsed {
        category.collapsed = false;
        view.set_category_collapsed(&category.id, false);
    }
}

fn apply_fold_changes(page: &mut Page, changes: &[(usize, FoldState)], view: &mut dyn ViewAdapter) {
    for &(index, state) in changes {
        let fold = &mut page.folds[index];
        fold.state = state;
        view.set_fold_state(&fold.id, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_page;
    use crate::view::RecordingView;

    fn navigator() -> Navigator {
        Navigator::new("topic", MOBILE_BREAKPOINT)
    }

    #[test]
    fn test_resolve_hidden_topic_in_collapsed_category() {
        let mut page = sample_page();
        let mut view = RecordingView::new();
        let mut nav = navigator();
        let id = page.find_item("42").unwrap();
        page.categories[0].collapsed = true;
        page.item_mut(id).visible = false;

        let resolution = nav.resolve_hash("#topic-42", &mut page, &mut view);

        assert_eq!(resolution, Resolution::Handled);
        assert!(!page.categories[0].collapsed);
        assert!(page.item(id).visible);
        assert!(page.item(id).detail_open);
        assert_eq!(view.collapsed.get("lang"), Some(&false));
        assert_eq!(view.detail_open.get(&id), Some(&true));
        // scroll waits for the next frame
        assert!(view.scrolls.is_empty());
        assert_eq!(
            nav.run_frame(&mut view).map(|r| r.target),
            Some(ScrollTarget::Item(id))
        );
        assert_eq!(view.scrolls.len(), 1);
    }

    #[test]
    fn test_resolve_missing_topic_is_noop() {
        let mut page = sample_page();
        page.categories[1].collapsed = true;
        let before = page.clone();
        let mut view = RecordingView::new();
        let mut nav = navigator();

        assert_eq!(nav.resolve_hash("#topic-999", &mut page, &mut view), Resolution::NotHandled);
        assert_eq!(page.categories, before.categories);
        assert_eq!(page.folds, before.folds);
        assert!(nav.run_frame(&mut view).is_none());
        assert!(view.scrolls.is_empty());
    }

    #[test]
    fn test_resolve_category() {
        let mut page = sample_page();
        page.categories[1].collapsed = true;
        let mut view = RecordingView::new();
        let mut nav = navigator();

        assert!(nav.resolve_hash("#cat-infra", &mut page, &mut view).is_handled());
        assert!(!page.categories[1].collapsed);
        assert_eq!(
            nav.frames().pending().map(|r| r.target.clone()),
            Some(ScrollTarget::Category("infra".into()))
        );
        assert!(!nav.resolve_hash("#cat-nope", &mut page, &mut view).is_handled());
    }

    #[test]
    fn test_unreserved_fragment_not_handled() {
        let mut page = sample_page();
        let mut view = RecordingView::new();
        let mut nav = navigator();
        assert!(!nav.resolve_hash("#footer", &mut page, &mut view).is_handled());
        assert!(!nav.resolve_hash("#news-42", &mut page, &mut view).is_handled());
    }

    #[test]
    fn test_reveal_top_zone_entry_expands_fold_as_accordion() {
        let mut page = sample_page();
        page.items[2].id = Some("gpu".into());
        let mut view = RecordingView::new();
        let mut nav = navigator();
        nav.set_viewport_width(400);
        nav.collapse_all_folds(&mut page, &mut view);
        page.folds[0].state = FoldState::Expanded;

        assert!(nav.resolve_hash("#topic-gpu", &mut page, &mut view).is_handled());
        assert_eq!(page.folds[1].state, FoldState::Expanded);
        assert_eq!(page.folds[0].state, FoldState::Collapsed);
    }

    #[test]
    fn test_toggle_fold_wide_viewport_is_multi_open() {
        let mut page = sample_page();
        let mut view = RecordingView::new();
        let mut nav = navigator();
        nav.set_viewport_width(1280);
        nav.collapse_all_folds(&mut page, &mut view);

        nav.toggle_fold(&mut page, "highlights", &mut view);
        nav.toggle_fold(&mut page, "market", &mut view);
        assert!(page.folds.iter().all(|f| f.state.is_expanded()));

        nav.toggle_fold(&mut page, "market", &mut view);
        assert_eq!(view.folds.get("market"), Some(&FoldState::Collapsed));
    }

    #[test]
    fn test_toggle_cat() {
        let mut page = sample_page();
        let mut view = RecordingView::new();
        let nav = navigator();

        assert!(nav.toggle_cat(&mut page, "lang", &mut view));
        assert!(page.categories[0].collapsed);
        assert!(!page.categories[1].collapsed);
        assert!(nav.toggle_cat(&mut page, "lang", &mut view));
        assert!(!page.categories[0].collapsed);
        assert!(!nav.toggle_cat(&mut page, "nope", &mut view));
    }

    #[test]
    fn test_toggle_all_twice_restores() {
        let mut page = sample_page();
        let original = page.categories.clone();
        let mut view = RecordingView::new();
        let mut nav = navigator();
        let original_label = nav.toggle_all_label();

        nav.toggle_all_cats(&mut page, &mut view);
        assert!(page.categories.iter().all(|c| c.collapsed));
        assert_eq!(view.toggle_all_label.as_deref(), Some(EXPAND_ALL_LABEL));

        nav.toggle_all_cats(&mut page, &mut view);
        assert_eq!(page.categories, original);
        assert_eq!(view.toggle_all_label.as_deref(), Some(original_label));
    }

    #[test]
    fn test_toggle_all_overrides_individual_state() {
        let mut page = sample_page();
        let mut view = RecordingView::new();
        let mut nav = navigator();
        nav.toggle_cat(&mut page, "infra", &mut view);

        nav.toggle_all_cats(&mut page, &mut view);
        assert!(page.categories.iter().all(|c| c.collapsed));
        nav.toggle_all_cats(&mut page, &mut view);
        assert!(page.categories.iter().all(|c| !c.collapsed));
    }
}

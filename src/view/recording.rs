//! Adapter that records the latest view state

use super::ViewAdapter;
use crate::model::{FoldState, ItemId, ListId};
use crate::nav::ScrollRequest;
use crate::sort::SortPreference;
use crate::toc::ObserverOptions;
use std::collections::{BTreeSet, HashMap};

/// View adapter keeping the latest value of every indicator
///
/// Scroll requests and fragment rewrites are kept as ordered logs since
/// their history matters, everything else only holds the current value.
#[derive(Debug, Clone)]
pub struct RecordingView {
    pub visible: HashMap<ItemId, bool>,
    pub detail_open: HashMap<ItemId, bool>,
    pub orders: HashMap<ListId, Vec<ItemId>>,
    pub active_tag_controls: BTreeSet<String>,
    pub status: Option<String>,
    pub active_tags: Option<String>,
    pub hint: Option<String>,
    pub tag_bar: Option<(bool, String)>,
    pub sort_controls: Option<SortPreference>,
    pub collapsed: HashMap<String, bool>,
    pub toggle_all_label: Option<String>,
    pub folds: HashMap<String, FoldState>,
    pub scrolls: Vec<ScrollRequest>,
    pub scrolled_to_top: usize,
    pub fragments: Vec<String>,
    /// Whether `observe_sections` reports a working primitive
    pub observer_available: bool,
    pub observing: Option<(Vec<String>, ObserverOptions)>,
    /// Visibility subscriptions currently held open
    pub subscriptions: usize,
    pub toc_active: Option<String>,
    pub toc_selector: Option<String>,
}

impl RecordingView {
    /// Create a view whose runtime supports visibility tracking
    #[must_use]
    pub fn new() -> Self {
        Self {
            visible: HashMap::new(),
            detail_open: HashMap::new(),
            orders: HashMap::new(),
            active_tag_controls: BTreeSet::new(),
            status: None,
            active_tags: None,
            hint: None,
            tag_bar: None,
            sort_controls: None,
            collapsed: HashMap::new(),
            toggle_all_label: None,
            folds: HashMap::new(),
            scrolls: Vec::new(),
            scrolled_to_top: 0,
            fragments: Vec::new(),
            observer_available: true,
            observing: None,
            subscriptions: 0,
            toc_active: None,
            toc_selector: None,
        }
    }

    /// Create a view whose runtime lacks visibility tracking
    #[must_use]
    pub fn without_observer() -> Self {
        Self {
            observer_available: false,
            ..Self::new()
        }
    }
}

impl Default for RecordingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewAdapter for RecordingView {
    fn set_item_visible(&mut self, item: ItemId, visible: bool) {
        self.visible.insert(item, visible);
    }

    fn set_detail_open(&mut self, item: ItemId, open: bool) {
        self.detail_open.insert(item, open);
    }

    fn reorder_list(&mut self, list: ListId, order: &[ItemId]) {
        self.orders.insert(list, order.to_vec());
    }

    fn set_tag_control_active(&mut self, tag: &str, active: bool) {
        if active {
            self.active_tag_controls.insert(tag.to_string());
        } else {
            self.active_tag_controls.remove(tag);
        }
    }

    fn reset_tag_controls(&mut self) {
        self.active_tag_controls.clear();
    }

    fn set_status(&mut self, text: Option<&str>) {
        self.status = text.map(String::from);
    }

    fn set_active_tags(&mut self, text: Option<&str>) {
        self.active_tags = text.map(String::from);
    }

    fn set_hint(&mut self, text: Option<&str>) {
        self.hint = text.map(String::from);
    }

    fn set_tag_bar(&mut self, expanded: bool, label: &str) {
        self.tag_bar = Some((expanded, label.to_string()));
    }

    fn set_sort_controls(&mut self, pref: SortPreference) {
        self.sort_controls = Some(pref);
    }

    fn set_category_collapsed(&mut self, category: &str, collapsed: bool) {
        self.collapsed.insert(category.to_string(), collapsed);
    }

    fn set_toggle_all_label(&mut self, label: &str) {
        self.toggle_all_label = Some(label.to_string());
    }

    fn set_fold_state(&mut self, fold: &str, state: FoldState) {
        self.folds.insert(fold.to_string(), state);
    }

    fn scroll_into_view(&mut self, request: &ScrollRequest) {
        self.scrolls.push(request.clone());
    }

    fn scroll_to_top(&mut self) {
        self.scrolled_to_top += 1;
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.fragments.push(fragment.to_string());
    }

    fn observe_sections(&mut self, categories: &[String], options: &ObserverOptions) -> bool {
        if !self.observer_available {
            return false;
        }
        self.observing = Some((categories.to_vec(), options.clone()));
        self.subscriptions += 1;
        true
    }

    fn unobserve_sections(&mut self) {
        self.observing = None;
        self.subscriptions = self.subscriptions.saturating_sub(1);
    }

    fn set_toc_active(&mut self, category: &str) {
        self.toc_active = Some(category.to_string());
    }

    fn set_toc_selector(&mut self, value: &str) {
        self.toc_selector = Some(value.to_string());
    }
}

//! The index page controller
//!
//! [`IndexController`] owns every piece of page-lifetime state (filter state,
//! sort preference, navigation and table-of-contents tracking) together with
//! the page model and the view. Each public method corresponds to one user
//! or runtime event. None of them fail: missing controls are skipped, missing
//! targets are no-ops and storage failures are logged.

use tracing::{debug, info, warn};

use crate::TopicviewError;
use crate::config::EngineConfig;
use crate::filter::{self, FilterDecision, FilterState, TagMode};
use crate::model::{FoldState, Page};
use crate::nav::{Navigator, Resolution, ScrollRequest, category_fragment};
use crate::sort::{self, SortPreference, load_preference, persist_preference};
use crate::storage::{KeyValueStore, MemoryStore};
use crate::toc::{TocSync, TrackingMode, VisibilityChange};
use crate::view::ViewAdapter;

/// Session-store key set once the top-zone folds were auto-collapsed
pub const TOP_ZONE_SEEN_KEY: &str = "topZoneSeen";

/// Tag bar button label while collapsed
pub const SHOW_MORE_TAGS_LABEL: &str = "+ Show more tags";

/// Tag bar button label while expanded
pub const SHOW_FEWER_TAGS_LABEL: &str = "\u{2212} Show fewer tags";

/// Page-lifetime state plus the view it drives
pub struct IndexController<V: ViewAdapter> {
    page: Page,
    view: V,
    config: EngineConfig,
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    filter: FilterState,
    sort: SortPreference,
    nav: Navigator,
    toc: TocSync,
    tag_bar_expanded: bool,
}

impl<V: ViewAdapter> IndexController<V> {
    /// Create a builder for constructing an `IndexController`
    #[must_use]
    pub fn builder() -> IndexControllerBuilder<V> {
        IndexControllerBuilder::new()
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub const fn view(&self) -> &V {
        &self.view
    }

    pub const fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub const fn sort_preference(&self) -> SortPreference {
        self.sort
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.nav
    }

    #[must_use]
    pub const fn toc(&self) -> &TocSync {
        &self.toc
    }

    #[must_use]
    pub const fn tag_bar_expanded(&self) -> bool {
        self.tag_bar_expanded
    }

    /// Consume the controller, returning the page and the view
    #[must_use]
    pub fn into_parts(self) -> (Page, V) {
        (self.page, self.view)
    }

    // ---- startup and shutdown ----

    /// Initialize the page
    ///
    /// Restores and applies the sort preference, runs the first filter pass,
    /// then either resolves `initial_fragment` or handles a plain first view
    /// (scroll to top, first-visit fold collapse, optional category collapse).
    /// Finally starts table-of-contents tracking.
    pub fn setup(&mut self, prefix: &str, initial_fragment: Option<&str>) {
        self.nav.set_prefix(prefix);

        self.sort = load_preference(self.durable.as_ref());
        if self.page.controls.sort_selectors {
            self.view.set_sort_controls(self.sort);
        }
        sort::engine::apply(&mut self.page, self.sort, &mut self.view);

        if self.page.controls.tag_bar {
            self.view.set_tag_bar(self.tag_bar_expanded, self.tag_bar_label());
        }
        if self.page.controls.toggle_all {
            self.view.set_toggle_all_label(self.nav.toggle_all_label());
        }
        self.refresh_active_tags();
        self.apply_filter();

        match initial_fragment.filter(|hash| !hash.is_empty() && *hash != "#") {
            Some(hash) => {
                let resolution = self.resolve_hash(hash);
                debug!(hash, ?resolution, "initial fragment");
            }
            None => self.first_view(),
        }

        self.start_toc();
        info!(
            prefix,
            items = self.page.items.len(),
            sort = %self.sort,
            "index page ready"
        );
    }

    fn first_view(&mut self) {
        self.view.scroll_to_top();

        let seen = match self.session.get(TOP_ZONE_SEEN_KEY) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!(error = %e, "could not read session flag");
                false
            }
        };
        if !seen {
            self.nav.collapse_all_folds(&mut self.page, &mut self.view);
            if let Err(e) = self.session.set(TOP_ZONE_SEEN_KEY, "1") {
                warn!(error = %e, "could not write session flag");
            }
            debug!("top-zone folds collapsed on first view");
        }

        if self.config.collapse_categories_without_fragment {
            self.toggle_all_cats();
        }
    }

    fn start_toc(&mut self) {
        if self.toc.mode() == TrackingMode::Live {
            self.view.unobserve_sections();
        }
        let entries = self.page.category_ids();
        let available = self.view.observe_sections(&entries, &self.config.toc);
        self.toc = TocSync::new(entries);
        if let Some(first) = self.toc.start(available).map(str::to_string) {
            self.highlight_toc(&first);
        }
    }

    /// Release the visibility subscription
    pub fn teardown(&mut self) {
        if self.toc.mode() == TrackingMode::Live {
            self.view.unobserve_sections();
        }
        self.toc.stop();
    }

    // ---- filtering ----

    /// Select or deselect one tag
    pub fn toggle_tag(&mut self, tag: &str) {
        let selected = self.filter.toggle_tag(tag);
        self.view.set_tag_control_active(tag, selected);
        self.refresh_active_tags();
        self.apply_filter();
    }

    /// Deselect every tag; the query is left alone
    pub fn clear_tag_filter(&mut self) {
        self.filter.clear_tags();
        self.view.reset_tag_controls();
        self.refresh_active_tags();
        self.apply_filter();
    }

    pub fn set_query(&mut self, text: &str) {
        self.filter.query = text.to_string();
        self.apply_filter();
    }

    pub fn set_tag_mode(&mut self, mode: TagMode) {
        self.filter.tag_mode = mode;
        self.refresh_active_tags();
        self.apply_filter();
    }

    /// Recompute visibility and the readouts from the current filter state
    pub fn apply_filter(&mut self) -> FilterDecision {
        let decision = filter::decide(&self.page, &self.filter);
        filter::apply(&mut self.page, &decision, &mut self.view, self.config.show_total);
        decision
    }

    fn refresh_active_tags(&mut self) {
        if self.page.controls.active_tags {
            self.view.set_active_tags(self.filter.active_tags_label().as_deref());
        }
    }

    // ---- sorting ----

    /// Reorder every list and remember the choice
    pub fn apply_sort(&mut self, pref: SortPreference) {
        self.sort = pref;
        sort::engine::apply(&mut self.page, pref, &mut self.view);
        persist_preference(self.durable.as_ref(), pref);
    }

    // ---- categories and folds ----

    /// Flip one category; unknown identifiers are ignored
    pub fn toggle_cat(&mut self, id: &str) -> bool {
        self.nav.toggle_cat(&mut self.page, id, &mut self.view)
    }

    pub fn toggle_all_cats(&mut self) {
        self.nav.toggle_all_cats(&mut self.page, &mut self.view);
    }

    /// Move a top-zone fold to `state`; unknown folds are ignored
    pub fn set_fold(&mut self, id: &str, state: FoldState) {
        if let Some(index) = self.page.fold_index(id) {
            self.nav.set_fold(&mut self.page, index, state, &mut self.view);
        }
    }

    pub fn toggle_fold(&mut self, id: &str) {
        self.nav.toggle_fold(&mut self.page, id, &mut self.view);
    }

    /// Record the viewport width used by the fold accordion
    pub fn on_resize(&mut self, width: u32) {
        self.nav.set_viewport_width(width);
    }

    /// Expand or collapse the tag bar
    pub fn toggle_tag_bar(&mut self) {
        if !self.page.controls.tag_bar {
            return;
        }
        self.tag_bar_expanded = !self.tag_bar_expanded;
        self.view.set_tag_bar(self.tag_bar_expanded, self.tag_bar_label());
    }

    const fn tag_bar_label(&self) -> &'static str {
        if self.tag_bar_expanded {
            SHOW_FEWER_TAGS_LABEL
        } else {
            SHOW_MORE_TAGS_LABEL
        }
    }

    // ---- navigation ----

    pub fn resolve_hash(&mut self, hash: &str) -> Resolution {
        self.nav.resolve_hash(hash, &mut self.page, &mut self.view)
    }

    /// Handle a click on a link
    ///
    /// Only same-page links (`href` starting with `#`) are intercepted; links
    /// to other pages are left to the browser even when they carry a
    /// matching fragment. When the fragment is handled the caller must
    /// suppress the default jump; the address is rewritten with a history
    /// replace.
    pub fn on_link_click(&mut self, href: &str) -> Resolution {
        if !href.starts_with('#') {
            return Resolution::NotHandled;
        }
        let resolution = self.resolve_hash(href);
        if resolution.is_handled() {
            self.view.replace_fragment(href);
        }
        resolution
    }

    /// Handle a choice in the table-of-contents selector
    pub fn on_toc_select(&mut self, value: &str) -> Resolution {
        self.on_link_click(value)
    }

    /// Run the deferred scroll, if one is pending
    pub fn run_frame(&mut self) -> Option<ScrollRequest> {
        self.nav.run_frame(&mut self.view)
    }

    /// Feed visibility notifications into table-of-contents tracking
    pub fn on_visibility_change(&mut self, changes: &[VisibilityChange]) {
        if let Some(active) = self.toc.on_visibility_change(changes).map(str::to_string) {
            self.highlight_toc(&active);
        }
    }

    fn highlight_toc(&mut self, category: &str) {
        self.view.set_toc_active(category);
        if self.page.controls.toc_selector {
            self.view.set_toc_selector(&category_fragment(category));
        }
    }
}

/// Builder for [`IndexController`]
///
/// The page and the view are required. Without explicit stores both the
/// durable and the session store are in-memory.
///
/// # Examples
///
/// ```
/// # use topicview::controller::IndexController;
/// # use topicview::model::Page;
/// # use topicview::view::RecordingView;
/// let mut controller = IndexController::builder()
///     .page(Page::default())
///     .view(RecordingView::new())
///     .build()
///     .unwrap();
/// controller.setup("topic", None);
/// ```
pub struct IndexControllerBuilder<V: ViewAdapter> {
    page: Option<Page>,
    view: Option<V>,
    config: EngineConfig,
    durable: Option<Box<dyn KeyValueStore>>,
    session: Option<Box<dyn KeyValueStore>>,
}

impl<V: ViewAdapter> IndexControllerBuilder<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            page: None,
            view: None,
            config: EngineConfig::default(),
            durable: None,
            session: None,
        }
    }

    /// Set the page model (required)
    #[must_use]
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the view (required)
    #[must_use]
    pub fn view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Store that keeps the sort preference across visits
    #[must_use]
    pub fn durable_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.durable = Some(store);
        self
    }

    /// Store that lives as long as the browsing session
    #[must_use]
    pub fn session_store(mut self, store: Box<dyn KeyValueStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Build the `IndexController`
    ///
    /// # Errors
    ///
    /// Returns `TopicviewError::InvalidInput` if the page or the view is missing.
    pub fn build(self) -> Result<IndexController<V>, TopicviewError> {
        let page = self
            .page
            .ok_or_else(|| TopicviewError::InvalidInput("page model is required".to_string()))?;
        let view = self
            .view
            .ok_or_else(|| TopicviewError::InvalidInput("view is required".to_string()))?;

        let durable: Box<dyn KeyValueStore> = match self.durable {
            Some(store) => store,
            None => Box::new(MemoryStore::new()),
        };
        let session: Box<dyn KeyValueStore> = match self.session {
            Some(store) => store,
            None => Box::new(MemoryStore::new()),
        };

        let nav = Navigator::new(&self.config.page_prefix, self.config.mobile_breakpoint);
        Ok(IndexController {
            page,
            view,
            durable,
            session,
            config: self.config,
            filter: FilterState::new(),
            sort: SortPreference::default(),
            nav,
            toc: TocSync::default(),
            tag_bar_expanded: false,
        })
    }
}

impl<V: ViewAdapter> Default for IndexControllerBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}

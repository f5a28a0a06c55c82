//! Rendering surface abstraction
//!
//! The engine decides visibility, order and fold state; a [`ViewAdapter`]
//! applies those decisions to whatever surface hosts the page. The engine
//! only calls methods for controls the page declares (see
//! [`crate::model::Controls`]), so adapters never need to guard against
//! missing elements themselves.
//!
//! Two adapters ship with the crate:
//! - [`RecordingView`]: keeps the latest value of every indicator; used by
//!   tests and by the command-line harness
//! - [`terminal`]: prints a page plus a [`RecordingView`] snapshot

pub mod recording;
pub mod terminal;

pub use recording::RecordingView;

use crate::model::{FoldState, ItemId, ListId};
use crate::nav::ScrollRequest;
use crate::sort::SortPreference;
use crate::toc::ObserverOptions;

/// Trait for rendering surfaces
pub trait ViewAdapter {
    /// Show or hide one entry
    fn set_item_visible(&mut self, item: ItemId, visible: bool);

    /// Open or close the disclosure region attached to an entry
    fn set_detail_open(&mut self, item: ItemId, open: bool);

    /// Re-append the entries of a list in the given order
    fn reorder_list(&mut self, list: ListId, order: &[ItemId]);

    /// Mark every control bound to `tag` active or inactive
    fn set_tag_control_active(&mut self, tag: &str, active: bool);

    /// Mark every tag control inactive
    fn reset_tag_controls(&mut self);

    /// Combined filter status readout; `None` hides it
    fn set_status(&mut self, text: Option<&str>);

    /// Selected-tags readout; `None` hides it
    fn set_active_tags(&mut self, text: Option<&str>);

    /// "No results" hint; `None` hides it
    fn set_hint(&mut self, text: Option<&str>);

    /// Expand or collapse the tag bar and relabel its button
    fn set_tag_bar(&mut self, expanded: bool, label: &str);

    /// Reflect a sort preference in the sort selectors
    fn set_sort_controls(&mut self, pref: SortPreference);

    fn set_category_collapsed(&mut self, category: &str, collapsed: bool);

    fn set_toggle_all_label(&mut self, label: &str);

    fn set_fold_state(&mut self, fold: &str, state: FoldState);

    /// Scroll a revealed target into view
    fn scroll_into_view(&mut self, request: &ScrollRequest);

    /// Reset the scroll position to the top of the page
    fn scroll_to_top(&mut self);

    /// Rewrite the address-bar fragment without a new history entry
    fn replace_fragment(&mut self, fragment: &str);

    /// Start watching category sections for visibility changes
    ///
    /// Returns false when the runtime has no visibility-tracking primitive.
    fn observe_sections(&mut self, categories: &[String], options: &ObserverOptions) -> bool;

    /// Stop watching category sections
    fn unobserve_sections(&mut self);

    /// Highlight one table-of-contents entry
    fn set_toc_active(&mut self, category: &str);

    /// Set the value of the table-of-contents companion selector
    fn set_toc_selector(&mut self, value: &str);
}

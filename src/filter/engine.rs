//! Visibility decision and indicator update
//!
//! Recomputing is split in two steps:
//!
//! 1. [`decide`] is a pure function of the page and the [`FilterState`]. It
//!    returns a [`FilterDecision`] with per-item visibility and the tally.
//! 2. [`apply`] writes a decision into the page model and pushes it to a
//!    [`ViewAdapter`], together with the status readout and the hint.

use super::state::FilterState;
use crate::model::{ItemId, Page};
use crate::view::ViewAdapter;
use tracing::debug;

/// Fixed text shown when an active filter hides everything
pub const NO_RESULTS_HINT: &str =
    "No matching topics. Try a shorter or different query, or reset all filters.";

/// Facet results for one item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemMatch {
    pub hit_query: bool,
    pub hit_tag: bool,
}

impl ItemMatch {
    #[must_use]
    pub const fn visible(self) -> bool {
        self.hit_query && self.hit_tag
    }
}

/// Outcome of one recompute pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDecision {
    /// Indexed by [`ItemId`]
    pub matches: Vec<ItemMatch>,
    pub hits: usize,
    pub total: usize,
    pub query: Option<String>,
    pub tags: Vec<String>,
    pub tag_mode: super::TagMode,
}

impl FilterDecision {
    #[must_use]
    pub fn is_visible(&self, id: ItemId) -> bool {
        self.matches[id.0].visible()
    }

    #[must_use]
    pub fn is_filtering(&self) -> bool {
        self.query.is_some() || !self.tags.is_empty()
    }

    /// Combined status readout, `None` when nothing is filtered
    ///
    /// Names the active facets and the tally, e.g.
    /// `query "rust" + tags [async] (AND): 2 / 8 hits`.
    #[must_use]
    pub fn status_text(&self, show_total: bool) -> Option<String> {
        let facets = match (&self.query, self.tags.is_empty()) {
            (None, true) => return None,
            (Some(q), true) => format!("query \"{q}\""),
            (None, false) => format!("tags [{}] ({})", self.tags.join(", "), self.tag_mode),
            (Some(q), false) => format!(
                "query \"{q}\" + tags [{}] ({})",
                self.tags.join(", "),
                self.tag_mode
            ),
        };
        let tally = if show_total {
            format!("{} / {} hits", self.hits, self.total)
        } else {
            let noun = if self.hits == 1 { "hit" } else { "hits" };
            format!("{} {noun}", self.hits)
        };
        Some(format!("{facets}: {tally}"))
    }

    /// Whether the "no results" hint should be visible
    #[must_use]
    pub fn show_hint(&self) -> bool {
        self.is_filtering() && self.hits == 0
    }
}

/// Compute visibility for every item across all lists
#[must_use]
pub fn decide(page: &Page, state: &FilterState) -> FilterDecision {
    let matches: Vec<ItemMatch> = page
        .items
        .iter()
        .map(|item| ItemMatch {
            hit_query: state.matches_query(&item.title, &item.summary),
            hit_tag: state.matches_tags(&item.tags),
        })
        .collect();
    let hits = matches.iter().filter(|m| m.visible()).count();

    FilterDecision {
        total: matches.len(),
        hits,
        matches,
        query: state.query_active().then(|| state.query.clone()),
        tags: state.selected_tags().to_vec(),
        tag_mode: state.tag_mode,
    }
}

/// Write a decision into the page and the view
pub fn apply(
    page: &mut Page,
    decision: &FilterDecision,
    view: &mut dyn ViewAdapter,
    show_total: bool,
) {
    for (index, item) in page.items.iter_mut().enumerate() {
        let visible = decision.matches[index].visible();
        item.visible = visible;
        view.set_item_visible(ItemId(index), visible);
    }

    if page.controls.status {
        view.set_status(decision.status_text(show_total).as_deref());
    }
    if page.controls.hint {
        view.set_hint(decision.show_hint().then_some(NO_RESULTS_HINT));
    }

    debug!(
        hits = decision.hits,
        total = decision.total,
        filtering = decision.is_filtering(),
        "filter recomputed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::TagMode;
    use crate::testing::{sample_page, visible_titles};
    use crate::view::RecordingView;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_filter_shows_everything() {
        let page = sample_page();
        let decision = decide(&page, &FilterState::new());
        assert_eq!(decision.hits, 8);
        assert_eq!(decision.total, 8);
        assert!(!decision.is_filtering());
        assert_eq!(decision.status_text(true), None);
        assert!(!decision.show_hint());
    }

    #[test]
    fn test_query_matches_title_or_summary() {
        let page = sample_page();
        let state = FilterState { query: "RUST".into(), ..FilterState::default() };
        let mut decided = page.clone();
        let decision = decide(&page, &state);
        apply(&mut decided, &decision, &mut RecordingView::new(), true);

        // "Weekly roundup" carries the tag, not the text
        assert_eq!(visible_titles(&decided), vec!["eBPF tracing"]);
        assert_eq!(decision.status_text(true).as_deref(), Some("query \"RUST\": 1 / 8 hits"));
    }

    #[test]
    fn test_tag_and_or_modes() {
        let page = sample_page();
        let mut state = FilterState::new();
        state.toggle_tag("rust");
        state.toggle_tag("compiler");

        let and = decide(&page, &state);
        assert_eq!(and.hits, 1);
        assert!(and.is_visible(page.find_item("42").unwrap()));

        state.tag_mode = TagMode::Any;
        let or = decide(&page, &state);
        // rust: weekly, 42, 43, 51; compiler: 42, 44
        assert_eq!(or.hits, 5);
        assert!(or.is_visible(page.find_item("44").unwrap()));
    }

    #[test]
    fn test_combined_status_text() {
        let page = sample_page();
        let mut state = FilterState { query: "async".into(), ..FilterState::default() };
        state.toggle_tag("rust");
        let decision = decide(&page, &state);

        assert_eq!(
            decision.status_text(true).as_deref(),
            Some("query \"async\" + tags [rust] (AND): 1 / 8 hits")
        );
        assert_eq!(
            decision.status_text(false).as_deref(),
            Some("query \"async\" + tags [rust] (AND): 1 hit")
        );
    }

    #[test]
    fn test_tags_only_status_text() {
        let page = sample_page();
        let mut state = FilterState { tag_mode: TagMode::Any, ..FilterState::default() };
        state.toggle_tag("go");
        state.toggle_tag("zig");
        let decision = decide(&page, &state);
        assert_eq!(decision.status_text(true).as_deref(), Some("tags [go, zig] (OR): 2 / 8 hits"));
        assert_eq!(decision.status_text(false).as_deref(), Some("tags [go, zig] (OR): 2 hits"));
    }

    #[test]
    fn test_zero_hits_shows_hint() {
        let mut page = sample_page();
        let state = FilterState { query: "no such topic".into(), ..FilterState::default() };
        let decision = decide(&page, &state);
        let mut view = RecordingView::new();
        apply(&mut page, &decision, &mut view, true);

        assert!(decision.show_hint());
        assert_eq!(view.hint.as_deref(), Some(NO_RESULTS_HINT));
        assert!(visible_titles(&page).is_empty());
    }

    #[test]
    fn test_missing_controls_are_skipped() {
        let mut page = sample_page();
        page.controls = crate::model::Controls::none();
        let state = FilterState { query: "zzz".into(), ..FilterState::default() };
        let decision = decide(&page, &state);
        let mut view = RecordingView::new();
        apply(&mut page, &decision, &mut view, true);

        assert_eq!(view.status, None);
        assert_eq!(view.hint, None);
        assert_eq!(view.visible.get(&ItemId(0)), Some(&false));
    }
}

//! Table-of-contents highlighting
//!
//! Every category section has one table-of-contents entry. While the visitor
//! scrolls, the runtime reports which sections intersect the viewport and by
//! how much; [`TocSync`] keeps the intersecting set and picks the entry with
//! the highest ratio, earlier sections winning ties.
//!
//! When the runtime cannot observe visibility the first entry is marked
//! active once and stays that way.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options handed to the runtime's visibility observer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverOptions {
    /// Margin applied to the viewport, CSS shorthand
    pub root_margin: String,
    /// Ratios at which the runtime reports a change
    pub thresholds: Vec<f64>,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin: "-20% 0px -60% 0px".to_string(),
            thresholds: vec![0.0, 0.25, 0.5, 0.75, 1.0],
        }
    }
}

/// One visibility notification
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityChange {
    pub category: String,
    pub intersecting: bool,
    pub ratio: f64,
}

impl VisibilityChange {
    #[must_use]
    pub fn entering(category: &str, ratio: f64) -> Self {
        Self {
            category: category.to_string(),
            intersecting: true,
            ratio,
        }
    }

    #[must_use]
    pub fn leaving(category: &str) -> Self {
        Self {
            category: category.to_string(),
            intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Tracking mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    /// Not started yet
    #[default]
    Idle,
    /// Following visibility notifications
    Live,
    /// No observer on this runtime; first entry pinned
    Pinned,
}

/// Active-entry tracker
#[derive(Debug, Clone, Default)]
pub struct TocSync {
    entries: Vec<String>,
    /// Intersection ratio per entry, `None` when not intersecting
    ratios: Vec<Option<f64>>,
    active: Option<usize>,
    mode: TrackingMode,
}

impl TocSync {
    /// Tracker over category identifiers in document order
    #[must_use]
    pub fn new(entries: Vec<String>) -> Self {
        let ratios = vec![None; entries.len()];
        Self {
            entries,
            ratios,
            active: None,
            mode: TrackingMode::Idle,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> TrackingMode {
        self.mode
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Identifier of the highlighted entry
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.map(|i| self.entries[i].as_str())
    }

    /// Begin tracking
    ///
    /// With `observer_available` false the first entry is pinned and
    /// returned so the caller can highlight it.
    pub fn start(&mut self, observer_available: bool) -> Option<&str> {
        if observer_available {
            self.mode = TrackingMode::Live;
            return None;
        }
        self.mode = TrackingMode::Pinned;
        self.active = (!self.entries.is_empty()).then_some(0);
        debug!(active = ?self.active(), "visibility tracking unavailable, first entry pinned");
        self.active()
    }

    /// Stop tracking and forget intersection state
    pub fn stop(&mut self) {
        self.mode = TrackingMode::Idle;
        self.ratios.iter_mut().for_each(|r| *r = None);
    }

    /// Apply a batch of notifications
    ///
    /// Returns the newly active entry when the highlight moves. Unknown
    /// categories are ignored, and so is everything unless tracking is live.
    pub fn on_visibility_change(&mut self, changes: &[VisibilityChange]) -> Option<&str> {
        if self.mode != TrackingMode::Live {
            return None;
        }

        for change in changes {
            if let Some(index) = self.entries.iter().position(|e| *e == change.category) {
                self.ratios[index] = change.intersecting.then_some(change.ratio);
            }
        }

        let best = self.best_intersecting()?;
        if self.active == Some(best) {
            return None;
        }
        self.active = Some(best);
        self.active()
    }

    /// Highest ratio among intersecting entries, first in document order on ties
    fn best_intersecting(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, ratio) in self.ratios.iter().enumerate() {
            let Some(ratio) = *ratio else { continue };
            match best {
                Some((_, top)) if ratio <= top => {}
                _ => best = Some((index, ratio)),
            }
        }
        best.map(|(index, _)| index)
    }
}

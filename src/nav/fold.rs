//! Top-zone fold transitions
//!
//! Each fold is a two-state machine (collapsed, expanded). On narrow
//! viewports the folds behave as an accordion: expanding one collapses its
//! siblings. Wider viewports let any number stay open.

use crate::model::{Fold, FoldState};

/// Default viewport width, in logical pixels, at or below which folds are single-open
pub const MOBILE_BREAKPOINT: u32 = 640;

/// Whether the accordion rule applies at this width
#[must_use]
pub const fn is_single_open(viewport_width: Option<u32>, breakpoint: u32) -> bool {
    match viewport_width {
        Some(width) => width <= breakpoint,
        None => false,
    }
}

/// State changes caused by moving fold `index` to `target`
///
/// Returns `(fold index, new state)` pairs for folds whose state actually
/// changes. Siblings are only collapsed when `index` transitions to expanded
/// under the accordion rule.
#[must_use]
pub fn transitions(
    folds: &[Fold],
    index: usize,
    target: FoldState,
    single_open: bool,
) -> Vec<(usize, FoldState)> {
    let Some(fold) = folds.get(index) else {
        return Vec::new();
    };
    if fold.state == target {
        return Vec::new();
    }

    let mut changes = vec![(index, target)];
    if target.is_expanded() && single_open {
        changes.extend(
            folds
                .iter()
                .enumerate()
                .filter(|(i, f)| *i != index && f.state.is_expanded())
                .map(|(i, _)| (i, FoldState::Collapsed)),
        );
    }
    changes
}

/// State changes that collapse every fold
#[must_use]
pub fn collapse_all(folds: &[Fold]) -> Vec<(usize, FoldState)> {
    folds
        .iter()
        .enumerate()
        .filter(|(_, f)| f.state.is_expanded())
        .map(|(i, _)| (i, FoldState::Collapsed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folds(states: &[FoldState]) -> Vec<Fold> {
        states
            .iter()
            .enumerate()
            .map(|(i, state)| Fold {
                id: format!("f{i}"),
                title: String::new(),
                state: *state,
            })
            .collect()
    }

    use FoldState::{Collapsed, Expanded};

    #[test]
    fn test_breakpoint_is_inclusive() {
        assert!(is_single_open(Some(640), MOBILE_BREAKPOINT));
        assert!(is_single_open(Some(320), MOBILE_BREAKPOINT));
        assert!(!is_single_open(Some(641), MOBILE_BREAKPOINT));
        assert!(!is_single_open(None, MOBILE_BREAKPOINT));
    }

    #[test]
    fn test_single_open_collapses_siblings() {
        let folds = folds(&[Expanded, Collapsed, Expanded]);
        let changes = transitions(&folds, 1, Expanded, true);
        assert_eq!(changes, vec![(1, Expanded), (0, Collapsed), (2, Collapsed)]);
    }

    #[test]
    fn test_multi_open_leaves_siblings() {
        let folds = folds(&[Expanded, Collapsed]);
        assert_eq!(transitions(&folds, 1, Expanded, false), vec![(1, Expanded)]);
    }

    #[test]
    fn test_no_transition_no_changes() {
        let folds = folds(&[Expanded, Expanded]);
        assert!(transitions(&folds, 0, Expanded, true).is_empty());
        assert!(transitions(&folds, 5, Expanded, true).is_empty());
    }

    #[test]
    fn test_collapsing_never_touches_siblings() {
        let folds = folds(&[Expanded, Expanded]);
        assert_eq!(transitions(&folds, 0, Collapsed, true), vec![(0, Collapsed)]);
    }

    #[test]
    fn test_collapse_all() {
        let folds = folds(&[Expanded, Collapsed, Expanded]);
        assert_eq!(collapse_all(&folds), vec![(0, Collapsed), (2, Collapsed)]);
    }
}

//! One-shot "next frame" scroll slot
//!
//! Revealing a target updates visibility and fold state first and scrolls on
//! the following frame, once layout has settled. Only the newest request
//! matters: scheduling replaces whatever is pending and there is no queue.

use crate::model::ItemId;

/// What to scroll to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    Item(ItemId),
    Category(String),
}

/// A pending smooth scroll aligning its target to the top of the viewport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: ScrollTarget,
}

impl ScrollRequest {
    #[must_use]
    pub const fn smooth(target: ScrollTarget) -> Self {
        Self { target }
    }
}

/// Replace-on-supersede slot for the next frame
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    pending: Option<ScrollRequest>,
}

impl FrameScheduler {
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule a request, returning the one it superseded
    pub fn schedule(&mut self, request: ScrollRequest) -> Option<ScrollRequest> {
        self.pending.replace(request)
    }

    /// Take the pending request for the frame being rendered
    pub fn take(&mut self) -> Option<ScrollRequest> {
        self.pending.take()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&ScrollRequest> {
        self.pending.as_ref()
    }
}

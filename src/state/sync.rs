//! Shared scroll and selection coordination across the three views.
//!
//! One scroll position and one selected row are shared by every view, so
//! the tables stay visually aligned no matter which of them the user
//! interacts with. Propagation always excludes the originating view,
//! which is what prevents scroll-event feedback loops.

use crate::model::ViewId;

/// Where an event has to be forwarded after a scroll or selection change.
///
/// `targets` never contains the view the event originated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    /// The row the other views move to.
    pub row: usize,
    /// The two views to update.
    pub targets: [ViewId; 2],
}

/// Owner of the shared scroll/selection/auto-scroll state.
#[derive(Debug, Clone)]
pub struct SyncCoordinator {
    scroll_row: usize,
    selected: Option<usize>,
    auto_scroll: bool,
    hover_held: bool,
}

impl SyncCoordinator {
    /// Create a coordinator at the top of an empty log.
    pub fn new(auto_scroll: bool) -> Self {
        Self {
            scroll_row: 0,
            selected: None,
            auto_scroll,
            hover_held: false,
        }
    }

    /// The shared scroll position, as a row index.
    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// The shared selected row, if any.
    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    /// Handle a scroll event originating in `origin`.
    ///
    /// Sets the shared position and reports the two *other* views as
    /// propagation targets; the originating view is excluded rather than
    /// merely deduplicated, so it never sees its own event again.
    pub fn scroll_from(&mut self, origin: ViewId, row: usize) -> Propagation {
        self.scroll_row = row;
        Propagation {
            row,
            targets: origin.others(),
        }
    }

    /// Handle a selection event originating in `origin`.
    pub fn select_from(&mut self, origin: ViewId, row: usize) -> Propagation {
        self.selected = Some(row);
        Propagation {
            row,
            targets: origin.others(),
        }
    }

    /// Position every view on `row` (auto-scroll after an append).
    ///
    /// Not a user event: there is no originating view and nothing to
    /// exclude.
    pub fn follow(&mut self, row: usize) {
        self.scroll_row = row;
    }

    /// Persistently enable or disable auto-scroll (the checkbox value).
    pub fn set_auto_scroll(&mut self, on: bool) {
        self.auto_scroll = on;
    }

    /// The persistent auto-scroll setting, ignoring any hover override.
    pub fn auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    /// Pointer entered a data view: suspend auto-scroll while it stays.
    pub fn hover_enter(&mut self) {
        self.hover_held = true;
    }

    /// Pointer left the data views: lift the suspension.
    pub fn hover_leave(&mut self) {
        self.hover_held = false;
    }

    /// Whether a hover is currently suspending auto-scroll.
    pub fn hover_held(&self) -> bool {
        self.hover_held
    }

    /// Auto-scroll as actually applied (and as the UI indicator shows it):
    /// the persistent flag gated by the transient hover suspension.
    pub fn effective_auto_scroll(&self) -> bool {
        self.auto_scroll && !self.hover_held
    }

    /// Forget scroll and selection after the log was cleared, so no index
    /// from the previous epoch survives.
    pub fn reset_position(&mut self) {
        self.scroll_row = 0;
        self.selected = None;
    }
}

impl Default for SyncCoordinator {
    fn default() -> Self {
        Self::new(true)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;

//! Tests for SyncCoordinator.

use super::*;

#[test]
fn scroll_propagates_to_the_other_two_views() {
    let mut sync = SyncCoordinator::default();

    let prop = sync.scroll_from(ViewId::MasterData, 5);

    assert_eq!(sync.scroll_row(), 5);
    assert_eq!(prop.row, 5);
    assert_eq!(prop.targets, [ViewId::SlaveData, ViewId::Timing]);
}

#[test]
fn scroll_never_targets_the_origin() {
    let mut sync = SyncCoordinator::default();
    for origin in ViewId::ALL {
        let prop = sync.scroll_from(origin, 3);
        assert!(
            !prop.targets.contains(&origin),
            "{origin:?} must not be re-notified"
        );
    }
}

#[test]
fn selection_propagates_to_the_other_two_views() {
    let mut sync = SyncCoordinator::default();

    let prop = sync.select_from(ViewId::Timing, 2);

    assert_eq!(sync.selected_row(), Some(2));
    assert_eq!(prop.targets, [ViewId::MasterData, ViewId::SlaveData]);
}

#[test]
fn follow_moves_scroll_without_selection() {
    let mut sync = SyncCoordinator::default();
    sync.follow(9);

    assert_eq!(sync.scroll_row(), 9);
    assert_eq!(sync.selected_row(), None);
}

// ===== Auto-scroll and hover =====

#[test]
fn auto_scroll_defaults_on() {
    let sync = SyncCoordinator::default();
    assert!(sync.auto_scroll());
    assert!(sync.effective_auto_scroll());
}

#[test]
fn hover_suspends_auto_scroll_transiently() {
    let mut sync = SyncCoordinator::default();

    sync.hover_enter();
    assert!(!sync.effective_auto_scroll());
    // The persistent setting is untouched.
    assert!(sync.auto_scroll());

    sync.hover_leave();
    assert!(sync.effective_auto_scroll());
}

#[test]
fn hover_leave_does_not_enable_a_disabled_auto_scroll() {
    let mut sync = SyncCoordinator::default();
    sync.set_auto_scroll(false);

    sync.hover_enter();
    sync.hover_leave();

    assert!(!sync.effective_auto_scroll());
    assert!(!sync.auto_scroll());
}

#[test]
fn indicator_tracks_the_hover_override() {
    let mut sync = SyncCoordinator::default();
    sync.hover_enter();
    // The UI shows the effective value while hovered.
    assert!(!sync.effective_auto_scroll());
    assert!(sync.hover_held());
}

#[test]
fn reset_position_drops_scroll_and_selection() {
    let mut sync = SyncCoordinator::default();
    sync.scroll_from(ViewId::SlaveData, 7);
    sync.select_from(ViewId::SlaveData, 7);

    sync.reset_position();

    assert_eq!(sync.scroll_row(), 0);
    assert_eq!(sync.selected_row(), None);
}

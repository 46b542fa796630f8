use triage_feed::{ArticleId, CommitKind, GestureConfig, GesturePhase, GestureTracker, OverlayTone, Release};

fn tracker(saved: bool) -> GestureTracker {
    GestureTracker::new(ArticleId::new("card"), &GestureConfig::default()).with_saved(saved)
}

fn drag(tracker: &mut GestureTracker, delta_x: f64) {
    assert!(tracker.pointer_down(100.0, 50.0));
    tracker.pointer_move(100.0 + delta_x, 50.0);
}

fn commit(kind: CommitKind) -> Release {
    Release::Commit {
        id: ArticleId::new("card"),
        kind,
    }
}

#[test]
fn pointer_down_starts_drag_at_zero() {
    let mut t = tracker(false);
    assert_eq!(t.phase(), GesturePhase::Idle);
    assert!(t.pointer_down(10.0, 20.0));
    assert_eq!(
        t.phase(),
        GesturePhase::Dragging {
            origin_x: 10.0,
            origin_y: 20.0,
            delta_x: 0.0
        }
    );
    assert_eq!(t.offset(), 0.0);
}

#[test]
fn vertical_motion_is_ignored() {
    let mut t = tracker(false);
    t.pointer_down(100.0, 100.0);
    t.pointer_move(130.0, 400.0);
    assert_eq!(t.offset(), 30.0);
}

#[test]
fn release_just_short_of_threshold_cancels() {
    let mut t = tracker(false);
    drag(&mut t, -79.0);
    assert_eq!(t.pointer_up(), Release::Cancel);
    assert_eq!(t.phase(), GesturePhase::Idle);
    assert_eq!(t.offset(), 0.0);
}

#[test]
fn release_at_threshold_commits_dismiss() {
    let mut t = tracker(false);
    drag(&mut t, -80.0);
    assert_eq!(t.pointer_up(), commit(CommitKind::Dismiss));
    assert_eq!(t.phase(), GesturePhase::Committing(CommitKind::Dismiss));
    assert!(t.is_leaving());
    assert!(!t.is_interactive());
}

#[test]
fn right_swipe_commits_save_and_resets_offset() {
    let mut t = tracker(false);
    drag(&mut t, 120.0);
    assert_eq!(t.pointer_up(), commit(CommitKind::Save));
    assert_eq!(t.offset(), 0.0);
    assert!(t.flash_visible());
    assert!(!t.is_leaving());
}

#[test]
fn right_swipe_on_saved_card_is_a_noop() {
    let mut t = tracker(true);
    drag(&mut t, 200.0);

    let overlay = t.overlay().unwrap();
    assert_eq!(overlay.tone, OverlayTone::AlreadySaved);
    assert_ne!(overlay.tone, OverlayTone::Save);

    assert_eq!(t.pointer_up(), Release::Cancel);
    assert_eq!(t.offset(), 0.0);
    assert!(!t.flash_visible());
}

#[test]
fn leave_is_evaluated_like_release() {
    let mut t = tracker(false);
    drag(&mut t, -95.0);
    assert_eq!(t.pointer_leave(), commit(CommitKind::Dismiss));

    let mut t = tracker(false);
    drag(&mut t, -20.0);
    assert_eq!(t.pointer_leave(), Release::Cancel);
}

#[test]
fn release_without_drag_is_ignored() {
    let mut t = tracker(false);
    assert_eq!(t.pointer_up(), Release::Ignored);
    assert_eq!(t.pointer_leave(), Release::Ignored);
}

#[test]
fn pending_commit_blocks_new_gestures() {
    let mut t = tracker(false);
    drag(&mut t, -100.0);
    t.pointer_up();

    assert!(!t.pointer_down(0.0, 0.0));
    t.pointer_move(-300.0, 0.0);
    assert_eq!(t.pointer_up(), Release::Ignored);
    assert_eq!(t.phase(), GesturePhase::Committing(CommitKind::Dismiss));
}

#[test]
fn settle_finishes_dismiss_for_good() {
    let mut t = tracker(false);
    drag(&mut t, -100.0);
    t.pointer_up();

    assert_eq!(t.settle(), Some(CommitKind::Dismiss));
    assert_eq!(t.phase(), GesturePhase::Settled);
    assert!(!t.pointer_down(0.0, 0.0));
    assert_eq!(t.settle(), None);
}

#[test]
fn settle_after_save_returns_to_idle_as_saved() {
    let mut t = tracker(false);
    drag(&mut t, 100.0);
    t.pointer_up();

    assert_eq!(t.settle(), Some(CommitKind::Save));
    assert_eq!(t.phase(), GesturePhase::Idle);
    assert!(t.is_saved());

    drag(&mut t, 100.0);
    assert_eq!(t.pointer_up(), Release::Cancel);
}

#[test]
fn overlay_opacity_scales_and_saturates() {
    let mut t = tracker(false);
    drag(&mut t, -40.0);
    let overlay = t.overlay().unwrap();
    assert_eq!(overlay.tone, OverlayTone::Dismiss);
    assert!((overlay.opacity - 0.5).abs() < 1e-9);

    t.pointer_move(100.0 + 60.0, 50.0);
    let overlay = t.overlay().unwrap();
    assert_eq!(overlay.tone, OverlayTone::Save);
    assert_eq!(overlay.tone.label(), "Save");
    assert!((overlay.opacity - 0.75).abs() < 1e-9);

    t.pointer_move(100.0 - 500.0, 50.0);
    assert_eq!(t.overlay().unwrap().opacity, 1.0);
}

#[test]
fn no_overlay_without_movement() {
    let mut t = tracker(false);
    assert!(t.overlay().is_none());
    t.pointer_down(0.0, 0.0);
    assert!(t.overlay().is_none());
}

#[test]
fn custom_threshold_is_respected() {
    let config = GestureConfig {
        commit_threshold_px: 40.0,
        ..Default::default()
    };
    let mut t = GestureTracker::new(ArticleId::new("card"), &config);
    t.pointer_down(0.0, 0.0);
    t.pointer_move(-40.0, 0.0);
    assert_eq!(t.pointer_up(), commit(CommitKind::Dismiss));
}

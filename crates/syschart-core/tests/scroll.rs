// File: crates/syschart-core/tests/scroll.rs
// Purpose: Validate scrollbar clamping, tail-following, and gesture transitions.

use syschart_core::scrollbar::{Gesture, Scrollbar, Viewport};

fn scrollbar(total: usize, window: usize) -> Scrollbar {
    let mut sb = Scrollbar::new();
    sb.set_total_range(total);
    sb.set_zoom(window);
    sb
}

#[test]
fn zoom_clamps_to_recorded_history() {
    let mut sb = scrollbar(50, 10);
    sb.set_zoom(500);
    assert_eq!(sb.visible_range(), (0, 50));
    sb.set_zoom(0);
    assert_eq!(sb.window_len(), 1);
}

#[test]
fn pan_round_trip_restores_the_window() {
    let mut sb = scrollbar(100, 10);
    sb.pan(-40);
    let origin = sb.visible_range();
    sb.pan(17);
    sb.pan(-17);
    assert_eq!(sb.visible_range(), origin);
}

#[test]
fn pan_clamps_silently_at_both_boundaries() {
    let mut sb = scrollbar(100, 10);
    sb.pan(-1_000);
    assert_eq!(sb.visible_range(), (0, 10));
    sb.pan(1_000_000);
    assert_eq!(sb.visible_range(), (90, 100));
    // After a clamp the round-trip property degrades to staying in bounds.
    sb.pan(5);
    assert_eq!(sb.visible_range(), (90, 100));
}

#[test]
fn tail_pinned_window_follows_growth() {
    let mut sb = scrollbar(50, 10);
    assert!(sb.is_at_tail());
    sb.set_total_range(60);
    assert_eq!(sb.visible_range(), (50, 60));
    assert!(sb.is_at_tail());
}

#[test]
fn detached_window_stays_put_while_history_grows() {
    let mut sb = scrollbar(50, 10);
    sb.pan(-20);
    assert_eq!(sb.visible_range(), (20, 30));
    sb.set_total_range(80);
    assert_eq!(sb.visible_range(), (20, 30));
    assert!(!sb.is_at_tail());
}

#[test]
fn unzoomed_window_spans_the_whole_history() {
    let mut sb = Scrollbar::new();
    sb.set_total_range(30);
    assert_eq!(sb.visible_range(), (0, 30));
    sb.set_total_range(40);
    assert_eq!(sb.visible_range(), (0, 40));
    assert!(sb.is_at_tail());
}

#[test]
fn empty_history_yields_an_empty_window() {
    let sb = Scrollbar::new();
    assert_eq!(sb.visible_range(), (0, 0));
    assert_eq!(sb.total_range(), 0);
}

#[test]
fn gesture_state_machine_round_trips() {
    let mut sb = scrollbar(100, 10);
    assert_eq!(sb.gesture(), Gesture::Idle);

    sb.begin_pan();
    assert_eq!(sb.gesture(), Gesture::Panning);
    // Zoom cannot start mid-pan.
    sb.begin_zoom();
    assert_eq!(sb.gesture(), Gesture::Panning);
    // Clamping invariants hold mid-gesture.
    sb.pan(-1_000);
    assert_eq!(sb.visible_range(), (0, 10));
    sb.end_pan();
    assert_eq!(sb.gesture(), Gesture::Idle);

    sb.begin_zoom();
    assert_eq!(sb.gesture(), Gesture::Zooming);
    sb.set_zoom(25);
    assert_eq!(sb.window_len(), 25);
    sb.end_zoom();
    assert_eq!(sb.gesture(), Gesture::Idle);
}

#[test]
fn viewport_tail_aligns_shorter_series() {
    let mut sb = scrollbar(100, 20);
    sb.pan(-10);
    let view = Viewport::from_scrollbar(&sb);
    assert_eq!((view.start, view.end), (70, 90));

    // A series spanning the whole history maps one-to-one.
    assert_eq!(view.local_range(100), (70, 90));
    // A 25-sample series occupies global indices [75, 100).
    assert_eq!(view.local_range(25), (0, 15));
    // A series entirely outside the window clamps to empty.
    assert_eq!(view.local_range(5), (0, 0));
}

use super::*;
use crate::input::{MotionAction, PointerSample};

fn container() -> IntRect {
    IntRect::new(0, 0, 400, 800)
}

fn tracker() -> MotionTracker {
    MotionTracker::new(20, 50.0)
}

#[test]
fn initial_touch_reports_nearby_edges() {
    let mut tracker = tracker();
    let edges = tracker.record_initial(0, Point::new(5.0, 790.0), container());
    assert_eq!(edges, EdgeFlags::LEFT | EdgeFlags::BOTTOM);
    assert!(tracker.is_edge_touched(EdgeFlags::BOTTOM));
    assert!(!tracker.is_edge_touched(EdgeFlags::TOP));

    let middle = tracker.record_initial(1, Point::new(200.0, 400.0), container());
    assert!(middle.is_empty());
    assert!(!tracker.is_edge_touched_by(EdgeFlags::ALL, 1));
}

#[test]
fn slop_uses_distance_for_both_axes() {
    let mut tracker = tracker();
    tracker.record_initial(0, Point::new(100.0, 100.0), container());
    tracker.record_move(&MotionEvent::moved(0, 106.0, 106.0, 16));

    // 6px per axis is within a slop of 8, but the diagonal is ~8.5px.
    assert!(!tracker.check_touch_slop(Directions::VERTICAL, 8));
    assert!(!tracker.check_touch_slop(Directions::HORIZONTAL, 8));
    assert!(tracker.check_touch_slop(Directions::ALL, 8));
    assert!(!tracker.check_touch_slop(Directions::NONE, 8));
}

#[test]
fn moves_for_untracked_pointers_are_dropped() {
    let mut tracker = tracker();
    tracker.record_initial(0, Point::new(10.0, 10.0), container());
    tracker.record_move(&MotionEvent::new(
        MotionAction::Move,
        0,
        16,
        [PointerSample::new(0, 12.0, 30.0), PointerSample::new(4, 99.0, 99.0)],
    ));

    assert_eq!(tracker.last_position(0), Some(Point::new(12.0, 30.0)));
    assert_eq!(tracker.last_position(4), None);
    assert!(!tracker.is_pointer_down(4));
}

#[test]
fn clearing_a_pointer_keeps_the_others() {
    let mut tracker = tracker();
    tracker.record_initial(0, Point::new(10.0, 10.0), container());
    tracker.record_initial(2, Point::new(50.0, 50.0), container());
    assert_eq!(tracker.tracked_ids().collect::<Vec<_>>(), vec![0, 2]);

    tracker.clear_pointer(0);
    assert!(!tracker.is_pointer_down(0));
    assert_eq!(tracker.initial_position(2), Some(Point::new(50.0, 50.0)));

    tracker.clear();
    assert_eq!(tracker.tracked_ids().count(), 0);
}

#[test]
fn out_of_range_ids_are_ignored() {
    let mut tracker = tracker();
    let edges = tracker.record_initial(64, Point::new(1.0, 1.0), container());
    assert!(edges.is_empty());
    assert!(!tracker.is_pointer_down(64));
    assert!(!tracker.is_pointer_down(200));
}

#[test]
fn edge_drag_and_lock_bits_accumulate() {
    let mut tracker = tracker();
    tracker.record_initial(0, Point::new(2.0, 2.0), container());
    tracker.mark_edge_drag(0, EdgeFlags::LEFT);
    tracker.lock_edge(0, EdgeFlags::TOP);
    assert_eq!(tracker.edge_drags_in_progress(0), EdgeFlags::LEFT);
    assert_eq!(tracker.edges_locked(0), EdgeFlags::TOP);

    // A new down on the same id starts from scratch.
    tracker.record_initial(0, Point::new(2.0, 2.0), container());
    assert!(tracker.edge_drags_in_progress(0).is_empty());
    assert!(tracker.edges_locked(0).is_empty());
}

#[test]
fn slow_release_has_no_velocity() {
    let mut tracker = tracker();
    tracker.add_movement(&MotionEvent::down(0, 0.0, 0.0, 0));
    tracker.add_movement(&MotionEvent::moved(0, 0.0, 0.2, 10));
    tracker.add_movement(&MotionEvent::moved(0, 0.0, 0.4, 20));
    assert_eq!(tracker.velocity(0, 8_000.0), (0.0, 0.0));
}

#[test]
fn fast_release_is_capped() {
    let mut tracker = tracker();
    tracker.add_movement(&MotionEvent::down(0, 0.0, 0.0, 0));
    tracker.add_movement(&MotionEvent::moved(0, 0.0, 400.0, 10));
    tracker.add_movement(&MotionEvent::moved(0, 0.0, 800.0, 20));
    let (vx, vy) = tracker.velocity(0, 8_000.0);
    assert_eq!(vx, 0.0);
    assert_eq!(vy, 8_000.0);
}

#[test]
fn upward_fling_is_capped_with_its_sign() {
    let mut tracker = tracker();
    tracker.add_movement(&MotionEvent::down(0, 0.0, 800.0, 0));
    tracker.add_movement(&MotionEvent::moved(0, 0.0, 400.0, 10));
    tracker.add_movement(&MotionEvent::moved(0, 0.0, 0.0, 20));
    assert_eq!(tracker.velocity(0, 8_000.0), (0.0, -8_000.0));
}

#[test]
fn velocity_floor_zeroes_slow_axes() {
    assert_eq!(zero_below(-20.0, 50.0), 0.0);
    assert_eq!(zero_below(-50.0, 50.0), -50.0);
    assert_eq!(zero_below(300.0, 50.0), 300.0);
}

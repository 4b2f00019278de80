use super::*;
use crate::input::PointerSample;
use slidepanel_animation::ManualFrameClock;

#[derive(Clone, Debug, PartialEq)]
enum Seen {
    State(DragState),
    Captured(u8, PointerId),
    Moved { top: i32, dy: i32 },
    Released(f32, f32),
    EdgeTouched(EdgeFlags),
    EdgeDrag(EdgeFlags),
}

/// One vertically draggable card inside a 400x800 container.
struct Board {
    rects: Vec<IntRect>,
    max_top: i32,
    settle_to: Option<IntPoint>,
    lock_edges: bool,
    seen: Vec<Seen>,
}

impl Board {
    fn new() -> Self {
        Self {
            rects: vec![IntRect::new(0, 100, 200, 300)],
            max_top: 600,
            settle_to: None,
            lock_edges: false,
            seen: Vec::new(),
        }
    }

    fn top(&self) -> i32 {
        self.rects[0].top
    }

    fn releases(&self) -> usize {
        self.seen
            .iter()
            .filter(|s| matches!(s, Seen::Released(..)))
            .count()
    }
}

impl DragCallback for Board {
    type Element = u8;

    fn try_capture(&mut self, _element: u8, _pointer_id: PointerId) -> bool {
        true
    }

    fn element_bounds(&self, element: u8) -> IntRect {
        self.rects[element as usize]
    }

    fn offset_element(&mut self, element: u8, dx: i32, dy: i32) {
        let rect = &mut self.rects[element as usize];
        *rect = rect.translate(dx, dy);
    }

    fn find_top_element_under(&self, x: i32, y: i32) -> Option<u8> {
        self.rects
            .iter()
            .rposition(|r| r.contains(x, y))
            .map(|i| i as u8)
    }

    fn container_bounds(&self) -> IntRect {
        IntRect::new(0, 0, 400, 800)
    }

    fn on_drag_state_changed(&mut self, state: DragState) {
        self.seen.push(Seen::State(state));
    }

    fn on_position_changed(&mut self, _element: u8, _left: i32, top: i32, _dx: i32, dy: i32) {
        self.seen.push(Seen::Moved { top, dy });
    }

    fn on_captured(&mut self, element: u8, pointer_id: PointerId) {
        self.seen.push(Seen::Captured(element, pointer_id));
    }

    fn on_released(&mut self, scope: &mut ReleaseScope<'_>, _element: u8, xvel: f32, yvel: f32) {
        self.seen.push(Seen::Released(xvel, yvel));
        if let Some(target) = self.settle_to {
            scope.settle_captured_at(target.x, target.y);
        }
    }

    fn on_edge_touched(&mut self, edges: EdgeFlags, _pointer_id: PointerId) {
        self.seen.push(Seen::EdgeTouched(edges));
    }

    fn on_edge_lock(&mut self, _edges: EdgeFlags) -> bool {
        self.lock_edges
    }

    fn on_edge_drag_started(&mut self, edges: EdgeFlags, _pointer_id: PointerId) {
        self.seen.push(Seen::EdgeDrag(edges));
    }

    fn vertical_drag_range(&self, _element: u8) -> i32 {
        self.max_top
    }

    fn clamp_vertical(&self, _element: u8, top: i32, _dy: i32) -> i32 {
        top.clamp(0, self.max_top)
    }
}

fn arbiter() -> (DragArbiter<u8>, ManualFrameClock) {
    let clock = ManualFrameClock::new(0);
    let arbiter = DragArbiter::new(DragConfig::for_density(1.0), Rc::new(clock.clone()));
    (arbiter, clock)
}

fn two_pointers(action: MotionAction, index: usize, t: u64, a: (f32, f32), b: (f32, f32)) -> MotionEvent {
    MotionEvent::new(
        action,
        index,
        t,
        [PointerSample::new(0, a.0, a.1), PointerSample::new(1, b.0, b.1)],
    )
}

#[test]
fn down_on_element_captures_immediately() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();

    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();

    assert_eq!(arbiter.state(), DragState::Dragging);
    assert_eq!(arbiter.captured(), Some(0));
    assert_eq!(arbiter.active_pointer_id(), Some(0));
    assert_eq!(
        board.seen,
        vec![Seen::Captured(0, 0), Seen::State(DragState::Dragging)]
    );
}

#[test]
fn moves_report_the_clamped_position() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();

    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 50.0, 190.0, 16))
        .unwrap();
    assert_eq!(board.top(), 140);

    // Far past the end of the range: only the remaining 460px are applied.
    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 50.0, 1_190.0, 32))
        .unwrap();
    assert_eq!(board.top(), 600);
    assert_eq!(board.seen.last(), Some(&Seen::Moved { top: 600, dy: 460 }));
}

#[test]
fn release_without_settle_goes_idle() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::up(0, 50.0, 150.0, 16))
        .unwrap();

    assert_eq!(board.releases(), 1);
    assert_eq!(arbiter.state(), DragState::Idle);
    assert_eq!(arbiter.captured(), None);
}

#[test]
fn release_with_target_settles_there() {
    let (mut arbiter, clock) = arbiter();
    let mut board = Board::new();
    board.settle_to = Some(IntPoint::new(0, 600));

    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 50.0, 200.0, 16))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::up(0, 50.0, 200.0, 32))
        .unwrap();
    assert_eq!(arbiter.state(), DragState::Settling);
    assert_eq!(arbiter.settle_target(), Some(IntPoint::new(0, 600)));

    clock.advance(16);
    assert!(arbiter.continue_settling(&mut board));
    assert!(board.top() > 150);

    clock.advance(600);
    assert!(!arbiter.continue_settling(&mut board));
    assert_eq!(board.top(), 600);
    assert_eq!(arbiter.state(), DragState::Idle);
    assert_eq!(board.seen.last(), Some(&Seen::State(DragState::Idle)));
}

#[test]
fn cancel_during_drag_releases_with_zero_velocity() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 50.0, 250.0, 10))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::cancel(0, 50.0, 250.0, 20))
        .unwrap();

    assert!(board.seen.contains(&Seen::Released(0.0, 0.0)));
    assert_eq!(arbiter.state(), DragState::Idle);
    assert!(!arbiter.is_pointer_down(0));
}

#[test]
fn capture_moves_to_a_remaining_pointer_without_release() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();
    // Second finger lands beside the card.
    arbiter
        .process_touch_event(
            &mut board,
            &two_pointers(MotionAction::PointerDown, 1, 10, (50.0, 150.0), (250.0, 150.0)),
        )
        .unwrap();
    assert_eq!(arbiter.active_pointer_id(), Some(0));

    arbiter
        .process_touch_event(
            &mut board,
            &two_pointers(MotionAction::Move, 0, 20, (50.0, 170.0), (150.0, 150.0)),
        )
        .unwrap();
    assert_eq!(board.top(), 120);

    arbiter
        .process_touch_event(
            &mut board,
            &two_pointers(MotionAction::PointerUp, 0, 30, (50.0, 170.0), (150.0, 150.0)),
        )
        .unwrap();

    assert_eq!(board.releases(), 0);
    assert_eq!(arbiter.state(), DragState::Dragging);
    assert_eq!(arbiter.active_pointer_id(), Some(1));
    assert_eq!(board.seen.last(), Some(&Seen::Captured(0, 1)));

    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(1, 150.0, 180.0, 40))
        .unwrap();
    assert_eq!(board.top(), 150);

    arbiter
        .process_touch_event(&mut board, &MotionEvent::up(1, 150.0, 180.0, 50))
        .unwrap();
    assert_eq!(board.releases(), 1);
}

#[test]
fn lifting_the_only_pointer_over_the_card_releases() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();
    arbiter
        .process_touch_event(
            &mut board,
            &two_pointers(MotionAction::PointerDown, 1, 10, (50.0, 150.0), (250.0, 150.0)),
        )
        .unwrap();
    arbiter
        .process_touch_event(
            &mut board,
            &two_pointers(MotionAction::PointerUp, 0, 20, (50.0, 150.0), (250.0, 150.0)),
        )
        .unwrap();

    assert_eq!(board.releases(), 1);
    assert_eq!(arbiter.state(), DragState::Idle);
}

#[test]
fn intercept_waits_for_touch_slop() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();

    assert!(!arbiter.should_intercept_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0)));
    assert!(!arbiter.should_intercept_touch_event(&mut board, &MotionEvent::moved(0, 50.0, 155.0, 10)));
    // Sideways motion does not count: the card has no horizontal range.
    assert!(!arbiter.should_intercept_touch_event(&mut board, &MotionEvent::moved(0, 80.0, 155.0, 20)));
    assert!(arbiter.should_intercept_touch_event(&mut board, &MotionEvent::moved(0, 80.0, 159.0, 30)));

    assert_eq!(arbiter.captured(), Some(0));
    // Intercepting never moves the element.
    assert_eq!(board.top(), 100);
}

#[test]
fn slop_queries_follow_the_tracker() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter.should_intercept_touch_event(&mut board, &MotionEvent::down(0, 300.0, 500.0, 0));
    arbiter.should_intercept_touch_event(&mut board, &MotionEvent::moved(0, 306.0, 506.0, 10));

    assert!(arbiter.check_touch_slop(Directions::ALL));
    assert!(!arbiter.check_touch_slop_for(Directions::VERTICAL, 0));
    assert!(!arbiter.check_touch_slop_for(Directions::ALL, 3));
}

#[test]
fn down_on_a_settling_card_catches_it() {
    let (mut arbiter, clock) = arbiter();
    let mut board = Board::new();
    assert!(arbiter.smooth_slide_element_to(&mut board, 0, 0, 600));
    assert_eq!(arbiter.state(), DragState::Settling);

    clock.advance(100);
    arbiter.continue_settling(&mut board);
    let caught_at = board.top();
    assert!(caught_at > 100 && caught_at < 600);

    let intercepted = arbiter.should_intercept_touch_event(
        &mut board,
        &MotionEvent::down(0, 50.0, (caught_at + 10) as f32, 200),
    );

    assert!(intercepted);
    assert_eq!(arbiter.state(), DragState::Dragging);
    assert_eq!(arbiter.settle_target(), None);
    clock.advance(500);
    assert!(!arbiter.continue_settling(&mut board));
    assert_eq!(board.top(), caught_at);
}

#[test]
fn abort_stops_where_the_last_frame_left_off() {
    let (mut arbiter, clock) = arbiter();
    let mut board = Board::new();
    arbiter.smooth_slide_element_to(&mut board, 0, 0, 600);
    clock.advance(100);
    arbiter.continue_settling(&mut board);
    let stopped_at = board.top();

    arbiter.abort(&mut board);
    assert_eq!(arbiter.state(), DragState::Idle);
    assert_eq!(arbiter.captured(), None);
    assert_eq!(arbiter.settle_target(), None);

    clock.advance(1_000);
    assert!(!arbiter.continue_settling(&mut board));
    assert_eq!(board.top(), stopped_at);
}

#[test]
fn slide_to_current_position_does_nothing() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    assert!(!arbiter.smooth_slide_element_to(&mut board, 0, 0, 100));
    assert_eq!(arbiter.state(), DragState::Idle);
    assert_eq!(arbiter.captured(), None);
    assert!(board.seen.is_empty());
}

#[test]
fn edge_drag_is_reported_once() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter.set_edge_tracking_enabled(EdgeFlags::BOTTOM);

    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 300.0, 790.0, 0))
        .unwrap();
    assert_eq!(board.seen, vec![Seen::EdgeTouched(EdgeFlags::BOTTOM)]);
    assert!(arbiter.is_edge_touched(EdgeFlags::BOTTOM));
    assert!(arbiter.is_edge_touched_by(EdgeFlags::BOTTOM, 0));

    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 300.0, 760.0, 10))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 300.0, 700.0, 20))
        .unwrap();

    let drags: Vec<_> = board
        .seen
        .iter()
        .filter(|s| matches!(s, Seen::EdgeDrag(_)))
        .collect();
    assert_eq!(drags, vec![&Seen::EdgeDrag(EdgeFlags::BOTTOM)]);
    assert_eq!(arbiter.state(), DragState::Idle);
}

#[test]
fn locked_edge_never_starts_a_drag() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    board.lock_edges = true;
    arbiter.set_edge_tracking_enabled(EdgeFlags::BOTTOM);

    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 300.0, 790.0, 0))
        .unwrap();
    // Mostly sideways: the owner locks the edge.
    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 330.0, 785.0, 10))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 330.0, 700.0, 20))
        .unwrap();

    assert!(!board.seen.iter().any(|s| matches!(s, Seen::EdgeDrag(_))));
    assert!(arbiter
        .motion_tracker()
        .edges_locked(0)
        .contains(EdgeFlags::BOTTOM));
}

#[test]
fn untracked_edges_are_not_reported() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 300.0, 790.0, 0))
        .unwrap();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::moved(0, 300.0, 700.0, 10))
        .unwrap();
    assert!(board.seen.is_empty());
}

#[test]
fn move_without_the_active_pointer_is_an_error() {
    let (mut arbiter, _clock) = arbiter();
    let mut board = Board::new();
    arbiter
        .process_touch_event(&mut board, &MotionEvent::down(0, 50.0, 150.0, 0))
        .unwrap();

    let result = arbiter.process_touch_event(&mut board, &MotionEvent::moved(5, 50.0, 190.0, 10));
    assert_eq!(result, Err(DragError::PointerNotTracked { pointer_id: 0 }));
    assert_eq!(board.top(), 100);
}

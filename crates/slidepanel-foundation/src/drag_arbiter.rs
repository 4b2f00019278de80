//! Drag arbiter: owns a touch stream, decides which element a pointer drags
//! and hands released elements to the settle engine.
//!
//! The arbiter knows nothing about the elements it moves. Everything it needs
//! (hit testing, bounds, drag ranges, clamping and the capture policy) comes
//! from a [`DragCallback`] passed into each operation, so the owner keeps its
//! element storage and the arbiter keeps only gesture state.

use std::fmt::Debug;
use std::rc::Rc;

use slidepanel_animation::{FrameClock, Interpolator, SettleEngine, SettleSpec};
use slidepanel_geometry::{IntPoint, IntRect, Point};

use crate::config::DragConfig;
use crate::edges::{Directions, EdgeFlags};
use crate::error::DragError;
use crate::input::{MotionAction, MotionEvent, PointerId};
use crate::motion_tracker::MotionTracker;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DragState {
    /// No element is being dragged or animated.
    #[default]
    Idle,
    /// An element is following a pointer.
    Dragging,
    /// An element is animating toward a rest position.
    Settling,
}

/// Policy and element access supplied by the owner of a [`DragArbiter`].
pub trait DragCallback {
    /// Handle the owner uses to name its draggable elements.
    type Element: Copy + Eq + Debug;

    /// Whether `pointer_id` may start dragging `element`. Consulted every time
    /// a new pointer tries to acquire an element, including the one already
    /// captured.
    fn try_capture(&mut self, element: Self::Element, pointer_id: PointerId) -> bool;

    fn element_bounds(&self, element: Self::Element) -> IntRect;

    /// Moves `element` by `(dx, dy)` pixels.
    fn offset_element(&mut self, element: Self::Element, dx: i32, dy: i32);

    /// Topmost element whose bounds contain `(x, y)`.
    fn find_top_element_under(&self, x: i32, y: i32) -> Option<Self::Element>;

    /// Bounds of the container, used for edge detection and as the reference
    /// distance of velocity-driven settles.
    fn container_bounds(&self) -> IntRect;

    fn on_drag_state_changed(&mut self, _state: DragState) {}

    /// Reports the clamped absolute position after every move.
    fn on_position_changed(
        &mut self,
        _element: Self::Element,
        _left: i32,
        _top: i32,
        _dx: i32,
        _dy: i32,
    ) {
    }

    fn on_captured(&mut self, _element: Self::Element, _pointer_id: PointerId) {}

    /// Called exactly once when the captured element is let go. Use `scope`
    /// to request a settle target; doing nothing leaves the arbiter idle.
    fn on_released(
        &mut self,
        _scope: &mut ReleaseScope<'_>,
        _element: Self::Element,
        _xvel: f32,
        _yvel: f32,
    ) {
    }

    fn on_edge_touched(&mut self, _edges: EdgeFlags, _pointer_id: PointerId) {}

    /// Return `true` to ignore further drags from `edges` for the rest of the
    /// gesture.
    fn on_edge_lock(&mut self, _edges: EdgeFlags) -> bool {
        false
    }

    fn on_edge_drag_started(&mut self, _edges: EdgeFlags, _pointer_id: PointerId) {}

    /// `0` means the element cannot move horizontally.
    fn horizontal_drag_range(&self, _element: Self::Element) -> i32 {
        0
    }

    /// `0` means the element cannot move vertically.
    fn vertical_drag_range(&self, _element: Self::Element) -> i32 {
        0
    }

    /// Restricts a proposed left edge. The default keeps the element where it is.
    fn clamp_horizontal(&self, element: Self::Element, _left: i32, _dx: i32) -> i32 {
        self.element_bounds(element).left
    }

    /// Restricts a proposed top edge. The default keeps the element where it is.
    fn clamp_vertical(&self, element: Self::Element, _top: i32, _dy: i32) -> i32 {
        self.element_bounds(element).top
    }

    fn is_point_under_element(&self, element: Self::Element, x: i32, y: i32) -> bool {
        self.element_bounds(element).contains(x, y)
    }
}

/// Settle access granted for the duration of [`DragCallback::on_released`].
pub struct ReleaseScope<'a> {
    engine: &'a mut SettleEngine,
    spec: SettleSpec,
    start: IntPoint,
    velocity: (f32, f32),
}

impl<'a> ReleaseScope<'a> {
    /// Animates the released element to `(left, top)` using the release
    /// velocity. Returns `false` when it is already there.
    pub fn settle_captured_at(&mut self, left: i32, top: i32) -> bool {
        let (vx, vy) = self.velocity;
        self.engine
            .begin(self.start, IntPoint::new(left, top), vx, vy, &self.spec)
    }

    /// Clamped velocity of the releasing pointer in px/s.
    pub fn velocity(&self) -> (f32, f32) {
        self.velocity
    }

    /// Position of the element at release.
    pub fn start(&self) -> IntPoint {
        self.start
    }
}

pub struct DragArbiter<E> {
    config: DragConfig,
    state: DragState,
    tracker: MotionTracker,
    settle: SettleEngine,
    captured: Option<E>,
    active_pointer_id: Option<PointerId>,
    tracking_edges: EdgeFlags,
}

impl<E: Copy + Eq + Debug> DragArbiter<E> {
    pub fn new(config: DragConfig, clock: Rc<dyn FrameClock>) -> Self {
        Self {
            tracker: MotionTracker::new(config.edge_size, config.min_velocity),
            settle: SettleEngine::new(clock),
            config,
            state: DragState::Idle,
            captured: None,
            active_pointer_id: None,
            tracking_edges: EdgeFlags::NONE,
        }
    }

    /// Replaces the quintic ease-out used for settles.
    pub fn with_interpolator(mut self, interpolator: Rc<dyn Interpolator>) -> Self {
        self.settle.set_interpolator(interpolator);
        self
    }

    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn captured(&self) -> Option<E> {
        self.captured
    }

    pub fn active_pointer_id(&self) -> Option<PointerId> {
        self.active_pointer_id
    }

    pub fn touch_slop(&self) -> i32 {
        self.config.touch_slop
    }

    pub fn min_velocity(&self) -> f32 {
        self.config.min_velocity
    }

    pub fn set_min_velocity(&mut self, min_velocity: f32) {
        self.config.min_velocity = min_velocity;
        self.tracker.set_min_velocity(min_velocity);
    }

    /// Enables edge-touch and edge-drag reporting for `edges`.
    pub fn set_edge_tracking_enabled(&mut self, edges: EdgeFlags) {
        self.tracking_edges = edges;
    }

    pub fn edge_size(&self) -> i32 {
        self.config.edge_size
    }

    /// Target of the settle in flight, if any.
    pub fn settle_target(&self) -> Option<IntPoint> {
        self.settle.final_position()
    }

    /// Captures `element` for `pointer_id` without consulting the policy.
    pub fn capture_element<C>(&mut self, callback: &mut C, element: E, pointer_id: PointerId)
    where
        C: DragCallback<Element = E>,
    {
        self.settle.abort();
        self.captured = Some(element);
        self.active_pointer_id = Some(pointer_id);
        callback.on_captured(element, pointer_id);
        self.set_drag_state(callback, DragState::Dragging);
    }

    /// Forgets all pointers of the current stream. No release is reported and
    /// the drag state is left as is.
    pub fn cancel(&mut self) {
        self.active_pointer_id = None;
        self.tracker.clear();
    }

    /// Cancels the stream and stops any settle where the last frame left it.
    pub fn abort<C>(&mut self, callback: &mut C)
    where
        C: DragCallback<Element = E>,
    {
        self.cancel();
        if self.state == DragState::Settling {
            self.settle.abort();
            if let Some(element) = self.captured {
                let reported = callback.element_bounds(element).origin();
                let current = self.settle.current();
                let (dx, dy) = (current.x - reported.x, current.y - reported.y);
                if dx != 0 || dy != 0 {
                    callback.offset_element(element, dx, dy);
                }
                callback.on_position_changed(element, current.x, current.y, dx, dy);
            }
        }
        self.set_drag_state(callback, DragState::Idle);
    }

    /// Animates `element` to `(left, top)` outside of a gesture, with no
    /// initial velocity. Returns `true` if a settle started.
    pub fn smooth_slide_element_to<C>(
        &mut self,
        callback: &mut C,
        element: E,
        left: i32,
        top: i32,
    ) -> bool
    where
        C: DragCallback<Element = E>,
    {
        self.captured = Some(element);
        self.active_pointer_id = None;
        let sliding = self.force_settle(callback, element, left, top, (0.0, 0.0));
        if !sliding && self.state == DragState::Idle {
            self.captured = None;
        }
        sliding
    }

    /// Advances the settle by one frame. Returns `true` while the element is
    /// still settling.
    pub fn continue_settling<C>(&mut self, callback: &mut C) -> bool
    where
        C: DragCallback<Element = E>,
    {
        let Some(element) = self.captured else {
            return false;
        };
        if self.state != DragState::Settling {
            return false;
        }

        let tick = self.settle.tick();
        let origin = callback.element_bounds(element).origin();
        let dx = tick.position.x - origin.x;
        let dy = tick.position.y - origin.y;
        if dx != 0 || dy != 0 {
            callback.offset_element(element, dx, dy);
            callback.on_position_changed(element, tick.position.x, tick.position.y, dx, dy);
        }
        if tick.finished {
            self.set_drag_state(callback, DragState::Idle);
        }
        self.state == DragState::Settling
    }

    /// Advisory path: watches a stream the owner has not committed to yet and
    /// reports whether a drag has started.
    pub fn should_intercept_touch_event<C>(&mut self, callback: &mut C, event: &MotionEvent) -> bool
    where
        C: DragCallback<Element = E>,
    {
        let action = event.action();
        if action == MotionAction::Down {
            self.cancel();
        }
        self.tracker.add_movement(event);

        match action {
            MotionAction::Down => {
                let Some(pointer) = event.pointer(0) else {
                    return self.is_dragging();
                };
                self.save_initial_motion(callback, pointer.id, pointer.position);
                let target = Self::element_under(callback, pointer.position);
                if target.is_some() && target == self.captured && self.state == DragState::Settling {
                    self.try_capture_for_drag(callback, target, pointer.id);
                }
                self.report_edge_touch(callback, pointer.id);
            }
            MotionAction::PointerDown => {
                let Some(pointer) = event.action_pointer() else {
                    return self.is_dragging();
                };
                self.save_initial_motion(callback, pointer.id, pointer.position);
                match self.state {
                    DragState::Idle => self.report_edge_touch(callback, pointer.id),
                    DragState::Settling => {
                        let target = Self::element_under(callback, pointer.position);
                        if target.is_some() && target == self.captured {
                            self.try_capture_for_drag(callback, target, pointer.id);
                        }
                    }
                    DragState::Dragging => {}
                }
            }
            MotionAction::Move => {
                self.look_for_drag_start(callback, event);
                self.tracker.record_move(event);
            }
            MotionAction::PointerUp => {
                if let Some(pointer) = event.action_pointer() {
                    self.tracker.clear_pointer(pointer.id);
                }
            }
            MotionAction::Up | MotionAction::Cancel => self.cancel(),
        }

        self.is_dragging()
    }

    /// Committed path: the owner already consumes the stream, so capture is
    /// attempted on down without waiting for the touch slop.
    pub fn process_touch_event<C>(&mut self, callback: &mut C, event: &MotionEvent) -> Result<(), DragError>
    where
        C: DragCallback<Element = E>,
    {
        let action = event.action();
        if action == MotionAction::Down {
            self.cancel();
        }
        self.tracker.add_movement(event);

        match action {
            MotionAction::Down => {
                let Some(pointer) = event.pointer(0) else {
                    return Ok(());
                };
                let target = Self::element_under(callback, pointer.position);
                self.save_initial_motion(callback, pointer.id, pointer.position);
                self.try_capture_for_drag(callback, target, pointer.id);
                self.report_edge_touch(callback, pointer.id);
            }
            MotionAction::PointerDown => {
                let Some(pointer) = event.action_pointer() else {
                    return Ok(());
                };
                self.save_initial_motion(callback, pointer.id, pointer.position);
                if self.state == DragState::Idle {
                    let target = Self::element_under(callback, pointer.position);
                    self.try_capture_for_drag(callback, target, pointer.id);
                    self.report_edge_touch(callback, pointer.id);
                } else {
                    let point = pointer.position.to_int();
                    if self.is_captured_element_under(callback, point.x, point.y) {
                        self.try_capture_for_drag(callback, self.captured, pointer.id);
                    }
                }
            }
            MotionAction::Move => {
                if self.state == DragState::Dragging {
                    self.drag_active_pointer(callback, event)?;
                } else {
                    self.look_for_drag_start(callback, event);
                }
                self.tracker.record_move(event);
            }
            MotionAction::PointerUp => {
                let Some(pointer) = event.action_pointer() else {
                    return Ok(());
                };
                if self.state == DragState::Dragging && self.active_pointer_id == Some(pointer.id) {
                    if !self.hand_off_capture(callback, event, pointer.id) {
                        self.release_for_pointer_up(callback)?;
                    }
                }
                self.tracker.clear_pointer(pointer.id);
            }
            MotionAction::Up => {
                if self.state == DragState::Dragging {
                    self.release_for_pointer_up(callback)?;
                }
                self.cancel();
            }
            MotionAction::Cancel => {
                if self.state == DragState::Dragging {
                    self.dispatch_released(callback, (0.0, 0.0))?;
                }
                self.cancel();
            }
        }
        Ok(())
    }

    /// Changes the drag state, notifying the owner. Going idle drops the
    /// captured element.
    pub fn set_drag_state<C>(&mut self, callback: &mut C, state: DragState)
    where
        C: DragCallback<Element = E>,
    {
        if self.state == state {
            return;
        }
        log::debug!("drag state {:?} -> {:?}", self.state, state);
        self.state = state;
        if state != DragState::Settling {
            self.settle.abort();
        }
        callback.on_drag_state_changed(state);
        if self.state == DragState::Idle {
            self.captured = None;
        }
    }

    /// Whether any pointer of the current stream moved past the touch slop
    /// along `directions`.
    pub fn check_touch_slop(&self, directions: Directions) -> bool {
        self.tracker.check_touch_slop(directions, self.config.touch_slop)
    }

    pub fn check_touch_slop_for(&self, directions: Directions, pointer_id: PointerId) -> bool {
        self.tracker
            .check_touch_slop_for(directions, pointer_id, self.config.touch_slop)
    }

    pub fn is_edge_touched(&self, edges: EdgeFlags) -> bool {
        self.tracker.is_edge_touched(edges)
    }

    pub fn is_edge_touched_by(&self, edges: EdgeFlags, pointer_id: PointerId) -> bool {
        self.tracker.is_edge_touched_by(edges, pointer_id)
    }

    pub fn is_pointer_down(&self, pointer_id: PointerId) -> bool {
        self.tracker.is_pointer_down(pointer_id)
    }

    pub fn is_captured_element_under<C>(&self, callback: &C, x: i32, y: i32) -> bool
    where
        C: DragCallback<Element = E>,
    {
        self.captured
            .is_some_and(|element| callback.is_point_under_element(element, x, y))
    }

    pub fn motion_tracker(&self) -> &MotionTracker {
        &self.tracker
    }

    fn element_under<C>(callback: &C, position: Point) -> Option<E>
    where
        C: DragCallback<Element = E>,
    {
        let point = position.to_int();
        callback.find_top_element_under(point.x, point.y)
    }

    fn save_initial_motion<C>(&mut self, callback: &C, pointer_id: PointerId, position: Point)
    where
        C: DragCallback<Element = E>,
    {
        self.tracker
            .record_initial(pointer_id, position, callback.container_bounds());
    }

    fn report_edge_touch<C>(&mut self, callback: &mut C, pointer_id: PointerId)
    where
        C: DragCallback<Element = E>,
    {
        let edges = self.tracker.edges_touched(pointer_id) & self.tracking_edges;
        if !edges.is_empty() {
            callback.on_edge_touched(edges, pointer_id);
        }
    }

    fn try_capture_for_drag<C>(&mut self, callback: &mut C, target: Option<E>, pointer_id: PointerId) -> bool
    where
        C: DragCallback<Element = E>,
    {
        let Some(element) = target else {
            return false;
        };
        if self.captured == Some(element)
            && self.active_pointer_id == Some(pointer_id)
            && self.state == DragState::Dragging
        {
            return true;
        }
        if callback.try_capture(element, pointer_id) {
            self.capture_element(callback, element, pointer_id);
            return true;
        }
        false
    }

    /// First pointer to cross the slop over a draggable element wins.
    fn look_for_drag_start<C>(&mut self, callback: &mut C, event: &MotionEvent)
    where
        C: DragCallback<Element = E>,
    {
        for sample in event.pointers() {
            let Some(initial) = self.tracker.initial_position(sample.id) else {
                log::trace!("no motion history for pointer {}", sample.id);
                continue;
            };
            let delta = sample.position - initial;
            self.report_new_edge_drags(callback, delta, sample.id);
            if self.state == DragState::Dragging {
                // An edge drag callback captured something.
                break;
            }
            let target = Self::element_under(callback, initial);
            if let Some(element) = target {
                if self.past_slop(callback, element, delta)
                    && self.try_capture_for_drag(callback, target, sample.id)
                {
                    break;
                }
            }
        }
    }

    /// Axes with no drag range never count toward the slop.
    fn past_slop<C>(&self, callback: &C, element: E, delta: Point) -> bool
    where
        C: DragCallback<Element = E>,
    {
        let mut directions = Directions::NONE;
        if callback.horizontal_drag_range(element) > 0 {
            directions = directions | Directions::HORIZONTAL;
        }
        if callback.vertical_drag_range(element) > 0 {
            directions = directions | Directions::VERTICAL;
        }
        let slop = self.config.touch_slop as f32;
        match (directions.horizontal(), directions.vertical()) {
            (true, true) => delta.x * delta.x + delta.y * delta.y > slop * slop,
            (true, false) => delta.x.abs() > slop,
            (false, true) => delta.y.abs() > slop,
            (false, false) => false,
        }
    }

    fn report_new_edge_drags<C>(&mut self, callback: &mut C, delta: Point, pointer_id: PointerId)
    where
        C: DragCallback<Element = E>,
    {
        let mut started = EdgeFlags::NONE;
        for (edge, along, across) in [
            (EdgeFlags::LEFT, delta.x, delta.y),
            (EdgeFlags::TOP, delta.y, delta.x),
            (EdgeFlags::RIGHT, delta.x, delta.y),
            (EdgeFlags::BOTTOM, delta.y, delta.x),
        ] {
            if self.check_new_edge_drag(callback, along, across, pointer_id, edge) {
                started |= edge;
            }
        }
        if !started.is_empty() {
            self.tracker.mark_edge_drag(pointer_id, started);
            callback.on_edge_drag_started(started, pointer_id);
        }
    }

    fn check_new_edge_drag<C>(
        &mut self,
        callback: &mut C,
        along: f32,
        across: f32,
        pointer_id: PointerId,
        edge: EdgeFlags,
    ) -> bool
    where
        C: DragCallback<Element = E>,
    {
        let along = along.abs();
        let across = across.abs();
        let slop = self.config.touch_slop as f32;
        if !self.tracker.edges_touched(pointer_id).contains(edge)
            || !self.tracking_edges.intersects(edge)
            || self.tracker.edges_locked(pointer_id).contains(edge)
            || self.tracker.edge_drags_in_progress(pointer_id).contains(edge)
            || (along <= slop && across <= slop)
        {
            return false;
        }
        if along < across * 0.5 && callback.on_edge_lock(edge) {
            self.tracker.lock_edge(pointer_id, edge);
            return false;
        }
        along > slop
    }

    fn drag_active_pointer<C>(&mut self, callback: &mut C, event: &MotionEvent) -> Result<(), DragError>
    where
        C: DragCallback<Element = E>,
    {
        let element = self.captured.ok_or(DragError::NoCapturedElement)?;
        let pointer_id = self.active_pointer_id.ok_or(DragError::NoCapturedElement)?;
        if !self.tracker.is_pointer_down(pointer_id) {
            log::trace!("active pointer {pointer_id} has no motion history");
            return Ok(());
        }
        let sample = event
            .find_pointer_index(pointer_id)
            .and_then(|index| event.pointer(index))
            .ok_or(DragError::PointerNotTracked { pointer_id })?;
        let last = self
            .tracker
            .last_position(pointer_id)
            .ok_or(DragError::PointerNotTracked { pointer_id })?;

        let dx = (sample.position.x - last.x) as i32;
        let dy = (sample.position.y - last.y) as i32;
        let origin = callback.element_bounds(element).origin();
        self.drag_to(callback, element, origin, dx, dy);
        Ok(())
    }

    /// Applies a proposed move after running it through the owner's clamps.
    fn drag_to<C>(&mut self, callback: &mut C, element: E, origin: IntPoint, dx: i32, dy: i32)
    where
        C: DragCallback<Element = E>,
    {
        let mut left = origin.x + dx;
        let mut top = origin.y + dy;
        if dx != 0 {
            left = callback.clamp_horizontal(element, left, dx);
        }
        if dy != 0 {
            top = callback.clamp_vertical(element, top, dy);
        }
        if dx == 0 && dy == 0 {
            return;
        }
        let clamped_dx = left - origin.x;
        let clamped_dy = top - origin.y;
        if clamped_dx != 0 || clamped_dy != 0 {
            callback.offset_element(element, clamped_dx, clamped_dy);
        }
        callback.on_position_changed(element, left, top, clamped_dx, clamped_dy);
    }

    /// Moves the capture to another pointer still over the captured element.
    fn hand_off_capture<C>(&mut self, callback: &mut C, event: &MotionEvent, lifted: PointerId) -> bool
    where
        C: DragCallback<Element = E>,
    {
        for sample in event.pointers() {
            if sample.id == lifted {
                continue;
            }
            let target = Self::element_under(callback, sample.position);
            if target.is_some()
                && target == self.captured
                && self.try_capture_for_drag(callback, target, sample.id)
            {
                log::debug!("capture handed from pointer {lifted} to {}", sample.id);
                return true;
            }
        }
        false
    }

    fn release_for_pointer_up<C>(&mut self, callback: &mut C) -> Result<(), DragError>
    where
        C: DragCallback<Element = E>,
    {
        let velocity = self.active_velocity();
        self.dispatch_released(callback, velocity)
    }

    fn active_velocity(&self) -> (f32, f32) {
        self.active_pointer_id
            .map(|id| self.tracker.velocity(id, self.config.max_velocity))
            .unwrap_or((0.0, 0.0))
    }

    fn dispatch_released<C>(&mut self, callback: &mut C, velocity: (f32, f32)) -> Result<(), DragError>
    where
        C: DragCallback<Element = E>,
    {
        let element = self.captured.ok_or(DragError::NoCapturedElement)?;
        let spec = self.settle_spec(callback, element);
        let start = callback.element_bounds(element).origin();
        let tracked = self.active_velocity();
        let mut scope = ReleaseScope {
            engine: &mut self.settle,
            spec,
            start,
            velocity: tracked,
        };
        callback.on_released(&mut scope, element, velocity.0, velocity.1);

        if self.settle.is_finished() {
            if self.state == DragState::Dragging {
                self.set_drag_state(callback, DragState::Idle);
            }
        } else {
            self.set_drag_state(callback, DragState::Settling);
        }
        Ok(())
    }

    fn force_settle<C>(
        &mut self,
        callback: &mut C,
        element: E,
        left: i32,
        top: i32,
        velocity: (f32, f32),
    ) -> bool
    where
        C: DragCallback<Element = E>,
    {
        let spec = self.settle_spec(callback, element);
        let start = callback.element_bounds(element).origin();
        if !self
            .settle
            .begin(start, IntPoint::new(left, top), velocity.0, velocity.1, &spec)
        {
            self.set_drag_state(callback, DragState::Idle);
            return false;
        }
        self.set_drag_state(callback, DragState::Settling);
        true
    }

    fn settle_spec<C>(&self, callback: &C, element: E) -> SettleSpec
    where
        C: DragCallback<Element = E>,
    {
        SettleSpec {
            horizontal_range: callback.horizontal_drag_range(element),
            vertical_range: callback.vertical_drag_range(element),
            reference_width: callback.container_bounds().width(),
            min_velocity: self.config.min_velocity,
            max_velocity: self.config.max_velocity,
        }
    }
}

#[cfg(test)]
#[path = "tests/drag_arbiter_tests.rs"]
mod tests;

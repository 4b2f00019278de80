//! Touch dispatch for the panel container.
//!
//! Mirrors how a view group routes a stream: children are offered the down
//! event, the container may intercept later and steal the stream, in which
//! case the children receive a cancel. The nested-scroll arbiter can also
//! move a stream between the panel and its scrollable child mid-gesture.

use slidepanel_foundation::{DragState, MotionAction, MotionEvent};
use slidepanel_geometry::Point;

use super::SlidingPanel;
use crate::nested_scroll::{PanelSnapshot, TouchRoute};

#[derive(Debug, Default)]
pub(super) struct DispatchState {
    /// A child consumed the down and receives the rest of the stream.
    children_own_stream: bool,
    /// Down position of a tap that may become a drag handle click.
    handle_press: Option<Point>,
}

impl SlidingPanel {
    /// Entry point for every touch event. Returns whether the panel or one
    /// of its children consumed it.
    pub fn dispatch_touch_event(&mut self, event: &MotionEvent) -> bool {
        let handled = self.dispatch_inner(event);
        self.track_handle_tap(event);
        self.apply_commands();
        handled
    }

    /// Decides whether the panel takes the stream away from its children.
    pub fn on_intercept_touch_event(&mut self, event: &MotionEvent) -> bool {
        if self.nested.is_child_handling() || !self.core.is_touch_enabled() {
            self.arbiter.abort(&mut self.core);
            return false;
        }
        let position = event.position();
        let initial = self.core.initial_motion;
        let adx = (position.x - initial.x).abs();
        let ady = (position.y - initial.y).abs();
        let slop = self.arbiter.touch_slop() as f32;

        match event.action() {
            MotionAction::Down => {
                self.core.unable_to_drag = false;
                self.core.initial_motion = position;
                if !self.core.is_drag_handle_under(position) {
                    self.arbiter.cancel();
                    self.core.unable_to_drag = true;
                    return false;
                }
            }
            MotionAction::Move => {
                if ady > slop && adx > ady {
                    self.arbiter.cancel();
                    self.core.unable_to_drag = true;
                    return false;
                }
            }
            MotionAction::Up | MotionAction::Cancel => {
                if self.arbiter.is_dragging() {
                    self.on_touch_event(event);
                    return true;
                }
                if ady <= slop
                    && adx <= slop
                    && self.core.slide_offset > 0.0
                    && !self.core.is_slideable_under(initial)
                {
                    if let Some(listener) = self.fade_click.clone() {
                        log::debug!("fade click");
                        listener(&self.core.controller);
                        return true;
                    }
                }
            }
            MotionAction::PointerDown | MotionAction::PointerUp => {}
        }
        self.arbiter.should_intercept_touch_event(&mut self.core, event)
    }

    /// Feeds a stream the panel owns to the drag arbiter. A failure is
    /// logged and reported as not consumed.
    pub fn on_touch_event(&mut self, event: &MotionEvent) -> bool {
        if !self.core.enabled || !self.core.is_touch_enabled() {
            return false;
        }
        match self.arbiter.process_touch_event(&mut self.core, event) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("touch event not consumed: {err}");
                false
            }
        }
    }

    fn dispatch_inner(&mut self, event: &MotionEvent) -> bool {
        let action = event.action();
        if !self.core.enabled
            || !self.core.is_touch_enabled()
            || (self.core.unable_to_drag && action != MotionAction::Down)
        {
            self.arbiter.abort(&mut self.core);
            return self.default_dispatch(event);
        }

        match action {
            MotionAction::Down => self.nested.on_down(event.position()),
            MotionAction::Move => {
                let snapshot = self.panel_snapshot();
                let route = self.nested.route_move(event.position(), &snapshot);
                log::trace!("move routed {route:?}");
                return self.route(event, route);
            }
            MotionAction::Up => {
                if self.nested.is_child_handling() {
                    self.arbiter.set_drag_state(&mut self.core, DragState::Idle);
                }
            }
            _ => {}
        }
        self.default_dispatch(event)
    }

    fn route(&mut self, event: &MotionEvent, route: TouchRoute) -> bool {
        match route {
            TouchRoute::Default => self.default_dispatch(event),
            TouchRoute::Panel => self.on_touch_event(event),
            TouchRoute::ChildToPanel => {
                self.core
                    .host
                    .dispatch_to_children(&event.with_action(MotionAction::Cancel));
                self.dispatch.children_own_stream = false;
                self.on_touch_event(&event.with_action(MotionAction::Down))
            }
            TouchRoute::PanelToChild => {
                self.arbiter.cancel();
                self.arbiter.set_drag_state(&mut self.core, DragState::Idle);
                self.dispatch.children_own_stream = true;
                self.core
                    .host
                    .dispatch_to_children(&event.with_action(MotionAction::Down))
            }
        }
    }

    fn default_dispatch(&mut self, event: &MotionEvent) -> bool {
        let action = event.action();
        if action == MotionAction::Down {
            self.dispatch.children_own_stream = false;
        }
        let intercepted = if action == MotionAction::Down || self.dispatch.children_own_stream {
            self.on_intercept_touch_event(event)
        } else {
            true
        };

        let handled = if !intercepted
            && action == MotionAction::Down
            && self.core.host.dispatch_to_children(event)
        {
            self.dispatch.children_own_stream = true;
            true
        } else if !self.dispatch.children_own_stream {
            self.on_touch_event(event)
        } else if intercepted {
            log::trace!("panel intercepted, cancelling children");
            self.core
                .host
                .dispatch_to_children(&event.with_action(MotionAction::Cancel));
            self.dispatch.children_own_stream = false;
            true
        } else {
            self.core.host.dispatch_to_children(event)
        };

        if matches!(action, MotionAction::Up | MotionAction::Cancel) {
            self.dispatch.children_own_stream = false;
        }
        handled
    }

    /// A down on the drag handle that no child consumed, followed by an up
    /// within the touch slop, is a click on the handle.
    fn track_handle_tap(&mut self, event: &MotionEvent) {
        let position = event.position();
        match event.action() {
            MotionAction::Down => {
                self.dispatch.handle_press = (self.core.drag_handle_clickable
                    && !self.dispatch.children_own_stream
                    && self.core.is_touch_enabled()
                    && self.core.is_drag_handle_under(position))
                .then_some(position);
            }
            MotionAction::Move => {
                if let Some(press) = self.dispatch.handle_press {
                    let slop = self.arbiter.touch_slop() as f32;
                    if (position.x - press.x).abs() > slop || (position.y - press.y).abs() > slop {
                        self.dispatch.handle_press = None;
                    }
                }
            }
            MotionAction::Up => {
                if self.dispatch.handle_press.take().is_some()
                    && self.arbiter.state() != DragState::Dragging
                {
                    self.toggle_from_handle();
                }
            }
            MotionAction::Cancel | MotionAction::PointerDown => self.dispatch.handle_press = None,
            MotionAction::PointerUp => {}
        }
    }

    fn panel_snapshot(&self) -> PanelSnapshot {
        PanelSnapshot {
            initial_motion: self.core.initial_motion,
            slideable: self.core.slideable,
            sliding_up: self.core.geometry.sliding_up,
            slide_offset: self.core.slide_offset,
            max_slide_offset: self.core.config.max_slide_offset,
            panel_dragging: self.arbiter.is_dragging(),
        }
    }
}

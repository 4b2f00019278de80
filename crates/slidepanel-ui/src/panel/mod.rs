//! The sliding panel: a state machine over a headless two-child container.
//!
//! [`SlidingPanel`] owns the drag arbiter and the nested-scroll arbiter and
//! drives them from the host's measure, layout, touch and frame calls.
//! Listener callbacks run in the middle of those calls and act on the panel
//! through a [`PanelController`]; queued requests are applied before the
//! outer call returns.

mod core;
mod dispatch;

use std::rc::Rc;

use slidepanel_animation::FrameClock;
use slidepanel_foundation::{DragArbiter, DragState, EdgeFlags};
use slidepanel_geometry::{Dp, IntRect};

use self::core::PanelCore;
use self::dispatch::DispatchState;
use crate::config::PanelConfig;
use crate::controller::{PanelCommand, PanelController};
use crate::error::PanelError;
use crate::host::{PanelChild, PanelHost};
use crate::layout::{PanelLayout, PanelMeasurements};
use crate::listeners::{FadeClickListener, ListenerId, PanelSlideListener};
use crate::nested_scroll::{NestedScrollArbiter, ScrollableChild};
use crate::saved_state::SavedState;
use crate::state::{Gravity, PanelState};

pub struct SlidingPanel {
    arbiter: DragArbiter<PanelChild>,
    core: PanelCore,
    nested: NestedScrollArbiter,
    dispatch: DispatchState,
    fade_click: Option<FadeClickListener>,
}

impl SlidingPanel {
    pub fn new(config: PanelConfig, clock: Rc<dyn FrameClock>, host: Box<dyn PanelHost>) -> Self {
        let arbiter =
            DragArbiter::new(config.drag_config(), clock).with_interpolator(Rc::new(config.easing));
        Self {
            arbiter,
            core: PanelCore::new(config, host),
            nested: NestedScrollArbiter::new(),
            dispatch: DispatchState::default(),
            fade_click: None,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.core.config
    }

    pub fn panel_state(&self) -> PanelState {
        self.core.state
    }

    /// Animates the panel to `state`, or sets it outright before the first
    /// layout. Ignored while disabled, while dragging, or when already in
    /// `state`; a settle in flight is stopped first.
    pub fn set_panel_state(&mut self, state: PanelState) -> Result<(), PanelError> {
        self.request_state(state)?;
        self.apply_commands();
        Ok(())
    }

    pub fn drag_state(&self) -> DragState {
        self.arbiter.state()
    }

    pub fn slide_offset(&self) -> f32 {
        self.core.slide_offset
    }

    pub fn anchor_point(&self) -> f32 {
        self.core.config.anchor_point
    }

    /// Values outside `(0, 1]` are ignored.
    pub fn set_anchor_point(&mut self, anchor_point: f32) {
        self.apply_anchor_point(anchor_point);
    }

    pub fn max_slide_offset(&self) -> f32 {
        self.core.config.max_slide_offset
    }

    /// Values above `1` are ignored.
    pub fn set_max_slide_offset(&mut self, max_slide_offset: f32) {
        if max_slide_offset > 1.0 {
            log::warn!("ignoring max slide offset {max_slide_offset} above 1");
            return;
        }
        self.core.config.max_slide_offset = max_slide_offset;
    }

    pub fn gravity(&self) -> Gravity {
        self.core.config.gravity
    }

    /// Only [`EdgeFlags::TOP`] or [`EdgeFlags::BOTTOM`] are accepted.
    pub fn set_gravity(&mut self, edges: EdgeFlags) -> Result<(), PanelError> {
        let gravity = Gravity::try_from(edges)?;
        self.core.config.gravity = gravity;
        self.core.geometry.sliding_up = gravity.is_sliding_up();
        if !self.core.first_layout {
            self.core.host.request_layout();
        }
        Ok(())
    }

    pub fn is_sliding_up(&self) -> bool {
        self.core.geometry.sliding_up
    }

    /// Collapsed panel height in pixels.
    pub fn panel_height(&self) -> i32 {
        self.core.geometry.panel_height
    }

    /// Changes the collapsed height (dp). A collapsed panel slides to its new
    /// resting position.
    pub fn set_panel_height(&mut self, panel_height: f32) {
        self.core.config.panel_height = panel_height;
        self.core.geometry.panel_height = self.core.config.panel_height_px();
        if !self.core.first_layout {
            self.core.host.request_layout();
        }
        if self.core.state == PanelState::Collapsed {
            self.smooth_slide_to_offset(0.0);
        }
        self.apply_commands();
    }

    pub fn set_parallax_offset(&mut self, parallax_offset: f32) {
        self.core.config.parallax_offset = parallax_offset;
        self.core.host.request_layout();
    }

    /// Vertical translation of the main child at the current offset.
    pub fn current_parallax_offset(&self) -> i32 {
        self.core.current_parallax_offset()
    }

    pub fn set_min_fling_velocity(&mut self, min_fling_velocity: f32) {
        self.core.config.min_fling_velocity = min_fling_velocity;
        self.arbiter
            .set_min_velocity(Dp(min_fling_velocity).to_px(self.core.config.density));
    }

    pub fn is_overlay_content(&self) -> bool {
        self.core.config.overlay_content
    }

    pub fn set_overlay_content(&mut self, overlay_content: bool) {
        self.core.config.overlay_content = overlay_content;
        self.core.host.request_layout();
    }

    pub fn is_clip_panel(&self) -> bool {
        self.core.config.clip_panel
    }

    pub fn set_clip_panel(&mut self, clip_panel: bool) {
        self.core.config.clip_panel = clip_panel;
        self.core.host.request_layout();
    }

    pub fn is_enabled(&self) -> bool {
        self.core.enabled
    }

    /// A disabled panel ignores touches and state requests and stops any
    /// settle on the next frame.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.core.enabled = enabled;
    }

    /// Whether touches may move the panel right now.
    pub fn is_touch_enabled(&self) -> bool {
        self.core.is_touch_enabled()
    }

    pub fn set_touch_enabled(&mut self, touch_enabled: bool) {
        self.core.touch_enabled = touch_enabled;
    }

    /// Restricts drags to start inside `handle`, given relative to the
    /// slideable. `None` makes the whole slideable a handle.
    pub fn set_drag_handle(&mut self, handle: Option<IntRect>) {
        self.core.drag_handle = handle;
    }

    /// Whether a tap on the drag handle toggles the panel.
    pub fn set_drag_handle_clickable(&mut self, clickable: bool) {
        self.core.drag_handle_clickable = clickable;
    }

    /// Toggles between collapsed and open (anchored when an anchor is set,
    /// expanded otherwise).
    pub fn on_drag_handle_click(&mut self) {
        self.toggle_from_handle();
        self.apply_commands();
    }

    pub fn set_fade_click_listener(&mut self, listener: Option<FadeClickListener>) {
        self.fade_click = listener;
    }

    pub fn add_panel_slide_listener(&mut self, listener: Rc<dyn PanelSlideListener>) -> ListenerId {
        self.core.listeners.borrow_mut().add(listener)
    }

    pub fn remove_panel_slide_listener(&mut self, id: ListenerId) -> bool {
        self.core.listeners.borrow_mut().remove(id)
    }

    /// Handle for queuing requests from places that cannot borrow the panel.
    pub fn controller(&self) -> PanelController {
        self.core.controller.clone()
    }

    pub fn set_scrollable(&mut self, scrollable: Option<ScrollableChild>) {
        self.nested.set_scrollable(scrollable);
    }

    pub fn scrollable(&self) -> Option<&ScrollableChild> {
        self.nested.scrollable()
    }

    /// Takes the container and child sizes for the coming layout. A gone
    /// slideable puts the panel in the hidden state.
    pub fn measure(&mut self, measurements: PanelMeasurements) {
        let height_changed = self
            .core
            .measurements
            .map_or(true, |previous| previous.height != measurements.height);
        if height_changed {
            self.core.first_layout = true;
        }
        if !measurements.slideable_visible {
            self.core.slideable_visible = false;
            self.core.set_state_internal(PanelState::Hidden);
        }
        let slideable_height = measurements
            .slideable_height
            .unwrap_or_else(|| measurements.content_height());
        self.core.geometry.container_height = measurements.height;
        self.core.geometry.padding_top = measurements.padding.top;
        self.core.geometry.padding_bottom = measurements.padding.bottom;
        self.core.geometry.panel_height = self.core.config.panel_height_px();
        self.core.geometry.slideable_height = slideable_height;
        self.core.measurements = Some(measurements);
        self.apply_commands();
    }

    /// Places the children and reports the result to the host.
    pub fn layout(&mut self) -> PanelLayout {
        if !self.core.is_measured() {
            log::warn!("layout requested before measure");
            return self.core.snapshot_layout();
        }
        let layout = self.core.layout_children();
        self.apply_commands();
        layout
    }

    /// Current placement without laying out again.
    pub fn current_layout(&self) -> PanelLayout {
        self.core.snapshot_layout()
    }

    pub fn on_attached(&mut self) {
        self.core.first_layout = true;
    }

    pub fn on_detached(&mut self) {
        self.core.first_layout = true;
    }

    /// Advances a settle by one frame. Returns `true` while the panel is
    /// still settling and wants another frame.
    pub fn on_frame(&mut self) -> bool {
        if self.arbiter.continue_settling(&mut self.core) {
            if self.core.enabled {
                self.core.host.request_redraw();
            } else {
                self.arbiter.abort(&mut self.core);
            }
        }
        self.apply_commands();
        self.arbiter.state() == DragState::Settling
    }

    /// Animates the panel to `slide_offset`. Returns `true` if a settle
    /// started.
    pub fn smooth_slide_to(&mut self, slide_offset: f32) -> bool {
        let started = self.smooth_slide_to_offset(slide_offset);
        self.apply_commands();
        started
    }

    /// Pairs the host's own state with the panel's rest state.
    pub fn save_state<T>(&self, host: T) -> SavedState<T> {
        let sliding_state = if self.core.state == PanelState::Dragging {
            self.core.last_rest_state
        } else {
            self.core.state
        };
        SavedState {
            host,
            sliding_state,
        }
    }

    /// Restores the rest state, applied on the next layout, and hands the
    /// host's part back.
    pub fn restore_state<T>(&mut self, saved: SavedState<T>) -> T {
        let state = if saved.sliding_state == PanelState::Dragging {
            log::warn!("saved state holds DRAGGING, restoring collapsed");
            PanelState::Collapsed
        } else {
            saved.sliding_state
        };
        self.core.state = state;
        self.core.first_layout = true;
        saved.host
    }

    pub fn slideable_bounds(&self) -> IntRect {
        self.core.slideable
    }

    pub fn main_bounds(&self) -> IntRect {
        self.core.main
    }

    pub fn is_slideable_visible(&self) -> bool {
        self.core.slideable_visible
    }

    pub fn is_main_visible(&self) -> bool {
        self.core.main_visible
    }

    pub fn listener_count(&self) -> usize {
        self.core.listeners.borrow().len()
    }

    fn request_state(&mut self, state: PanelState) -> Result<(), PanelError> {
        if state == PanelState::Dragging {
            return Err(PanelError::DraggingNotSettable);
        }
        if self.arbiter.is_dragging() {
            log::trace!("ignoring {state} request while a pointer holds the panel");
            return Ok(());
        }
        if self.arbiter.state() == DragState::Settling {
            self.arbiter.abort(&mut self.core);
        }
        self.transition_to(state);
        Ok(())
    }

    fn transition_to(&mut self, state: PanelState) {
        let current = self.core.state;
        if !self.core.enabled
            || (!self.core.first_layout && !self.core.is_measured())
            || state == current
            || current == PanelState::Dragging
        {
            log::trace!("ignoring transition {current} -> {state}");
            return;
        }
        if self.core.first_layout {
            self.core.set_state_internal(state);
            return;
        }
        if current == PanelState::Hidden {
            self.core.slideable_visible = true;
            self.core.host.request_layout();
        }
        match state {
            PanelState::Anchored => {
                self.smooth_slide_to_offset(self.core.config.anchor_point);
            }
            PanelState::Collapsed => {
                self.smooth_slide_to_offset(0.0);
            }
            PanelState::Expanded => {
                self.smooth_slide_to_offset(self.core.config.max_slide_offset);
            }
            PanelState::Hidden => {
                let top = self.core.geometry.hidden_top();
                self.smooth_slide_to_top(top);
            }
            PanelState::Dragging => {}
        }
    }

    fn toggle_from_handle(&mut self) {
        if !self.core.enabled || !self.core.is_touch_enabled() {
            return;
        }
        let target = if self.core.state.is_open() {
            PanelState::Collapsed
        } else if self.core.config.anchor_point < 1.0 {
            PanelState::Anchored
        } else {
            PanelState::Expanded
        };
        log::debug!("drag handle clicked, going {target}");
        if self.arbiter.state() == DragState::Settling {
            self.arbiter.abort(&mut self.core);
        }
        self.transition_to(target);
    }

    fn apply_anchor_point(&mut self, anchor_point: f32) {
        if anchor_point > 0.0 && anchor_point <= 1.0 {
            self.core.config.anchor_point = anchor_point;
            self.core.first_layout = true;
            self.core.host.request_layout();
        } else {
            log::warn!("ignoring anchor point {anchor_point} outside (0, 1]");
        }
    }

    fn smooth_slide_to_offset(&mut self, slide_offset: f32) -> bool {
        let top = self.core.geometry.panel_top(slide_offset);
        self.smooth_slide_to_top(top)
    }

    fn smooth_slide_to_top(&mut self, top: i32) -> bool {
        if !self.core.enabled || !self.core.is_measured() {
            return false;
        }
        let left = self.core.slideable.left;
        if self
            .arbiter
            .smooth_slide_element_to(&mut self.core, PanelChild::Slideable, left, top)
        {
            self.core.set_all_children_visible();
            self.core.host.request_redraw();
            return true;
        }
        false
    }

    /// Applies requests listeners queued through the controller, including
    /// any queued while applying them.
    fn apply_commands(&mut self) {
        while let Some(command) = self.core.controller.next_command() {
            log::trace!("applying {command:?}");
            match command {
                PanelCommand::SetPanelState(state) => {
                    if let Err(err) = self.request_state(state) {
                        log::warn!("queued state request failed: {err}");
                    }
                }
                PanelCommand::SetAnchorPoint(anchor_point) => self.apply_anchor_point(anchor_point),
                PanelCommand::SetTouchEnabled(enabled) => self.core.touch_enabled = enabled,
                PanelCommand::SetEnabled(enabled) => self.core.enabled = enabled,
                PanelCommand::SmoothSlideTo(slide_offset) => {
                    self.smooth_slide_to_offset(slide_offset);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/sliding_panel_tests.rs"]
mod tests;

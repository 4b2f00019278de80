//! Panel state and child placement. The drag arbiter moves the slideable
//! through the [`DragCallback`] implementation here.

use std::cell::RefCell;
use std::rc::Rc;

use slidepanel_foundation::{DragCallback, DragState, PointerId, ReleaseScope};
use slidepanel_geometry::{IntRect, Point};

use crate::config::PanelConfig;
use crate::controller::PanelController;
use crate::host::{PanelChild, PanelHost};
use crate::layout::{PanelLayout, PanelMeasurements};
use crate::listeners::ListenerRegistry;
use crate::panel_geometry::PanelGeometry;
use crate::state::PanelState;

pub(crate) struct PanelCore {
    pub(crate) config: PanelConfig,
    pub(crate) host: Box<dyn PanelHost>,
    pub(crate) state: PanelState,
    /// State before the current drag started.
    pub(crate) last_rest_state: PanelState,
    pub(crate) slide_offset: f32,
    pub(crate) geometry: PanelGeometry,
    pub(crate) measurements: Option<PanelMeasurements>,
    pub(crate) slideable: IntRect,
    pub(crate) main: IntRect,
    pub(crate) slideable_visible: bool,
    pub(crate) main_visible: bool,
    /// Derive the offset from the state on the next layout instead of
    /// keeping the current one.
    pub(crate) first_layout: bool,
    pub(crate) enabled: bool,
    pub(crate) touch_enabled: bool,
    /// Set for gestures that did not start on the drag handle.
    pub(crate) unable_to_drag: bool,
    pub(crate) initial_motion: Point,
    /// Relative to the slideable; `None` makes the whole slideable a handle.
    pub(crate) drag_handle: Option<IntRect>,
    pub(crate) drag_handle_clickable: bool,
    pub(crate) listeners: Rc<RefCell<ListenerRegistry>>,
    pub(crate) controller: PanelController,
}

impl PanelCore {
    pub(crate) fn new(config: PanelConfig, host: Box<dyn PanelHost>) -> Self {
        let state = if config.initial_state == PanelState::Dragging {
            log::warn!("initial state cannot be DRAGGING, starting collapsed");
            PanelState::Collapsed
        } else {
            config.initial_state
        };
        let listeners = Rc::new(RefCell::new(ListenerRegistry::default()));
        let controller = PanelController::new(listeners.clone());
        Self {
            geometry: PanelGeometry {
                panel_height: config.panel_height_px(),
                sliding_up: config.gravity.is_sliding_up(),
                ..PanelGeometry::default()
            },
            config,
            host,
            state,
            last_rest_state: state,
            slide_offset: 0.0,
            measurements: None,
            slideable: IntRect::EMPTY,
            main: IntRect::EMPTY,
            slideable_visible: true,
            main_visible: true,
            first_layout: true,
            enabled: true,
            touch_enabled: true,
            unable_to_drag: false,
            initial_motion: Point::ZERO,
            drag_handle: None,
            drag_handle_clickable: true,
            listeners,
            controller,
        }
    }

    pub(crate) fn is_measured(&self) -> bool {
        self.measurements.is_some()
    }

    pub(crate) fn is_touch_enabled(&self) -> bool {
        self.touch_enabled && self.is_measured() && self.state != PanelState::Hidden
    }

    pub(crate) fn set_state_internal(&mut self, state: PanelState) {
        if self.state == state {
            return;
        }
        let previous = self.state;
        self.state = state;
        log::debug!("panel state {previous} -> {state}");
        let snapshot = self.listeners.borrow().snapshot();
        for listener in snapshot {
            listener.on_panel_state_changed(&self.controller, previous, state);
        }
    }

    fn dispatch_slide(&self) {
        let snapshot = self.listeners.borrow().snapshot();
        for listener in snapshot {
            listener.on_panel_slide(&self.controller, self.slide_offset);
        }
    }

    /// Where a release with vertical velocity `yvel` comes to rest.
    pub(crate) fn release_target(&self, yvel: f32) -> f32 {
        let anchor = self.config.anchor_point;
        let max = self.config.max_slide_offset;
        let offset = self.slide_offset;
        // Positive when moving toward expanded.
        let direction = if self.geometry.sliding_up { -yvel } else { yvel };
        if direction > 0.0 && offset <= anchor {
            anchor
        } else if direction > 0.0 {
            max
        } else if direction < 0.0 && offset >= anchor {
            anchor
        } else if direction < 0.0 {
            0.0
        } else if offset >= (1.0 + anchor) / 2.0 {
            max
        } else if offset >= anchor / 2.0 {
            anchor
        } else {
            0.0
        }
    }

    /// Remembers the rest state the panel leaves and enters `Dragging`.
    fn enter_dragging(&mut self) {
        if self.state != PanelState::Dragging {
            self.last_rest_state = self.state;
        }
        self.set_state_internal(PanelState::Dragging);
    }

    fn on_panel_dragged(&mut self, top: i32) {
        self.enter_dragging();
        self.slide_offset = self.geometry.slide_offset(top);
        self.dispatch_slide();
        self.main = self.main_rect();
        self.emit_layout();
    }

    /// Classifies the position the slideable stopped at.
    fn settle_rest_state(&mut self) {
        if !self.is_measured() {
            return;
        }
        let top = self.slideable.top;
        self.slide_offset = self.geometry.slide_offset(top);
        if top == self.geometry.panel_top(self.config.max_slide_offset) {
            self.update_obscured_visibility();
            self.set_state_internal(PanelState::Expanded);
        } else if top == self.geometry.collapsed_top() {
            self.set_state_internal(PanelState::Collapsed);
        } else if self.slide_offset < 0.0 {
            self.set_state_internal(PanelState::Hidden);
            self.slideable_visible = false;
        } else {
            self.update_obscured_visibility();
            self.set_state_internal(PanelState::Anchored);
        }
        self.emit_layout();
    }

    pub(crate) fn set_all_children_visible(&mut self) {
        self.slideable_visible = true;
        self.main_visible = true;
    }

    /// Hides the main child when an opaque slideable covers all of its
    /// visible area.
    pub(crate) fn update_obscured_visibility(&mut self) {
        let Some(m) = self.measurements else {
            return;
        };
        let cover = if m.slideable_opaque && self.slideable_visible {
            self.slideable
        } else {
            IntRect::EMPTY
        };
        let clamped = IntRect::new(
            self.main.left.max(m.padding.left),
            self.main.top.max(m.padding.top),
            self.main.right.min(m.width - m.padding.right),
            self.main.bottom.min(m.height - m.padding.bottom),
        );
        self.main_visible = !cover.encloses(&clamped);
    }

    pub(crate) fn current_parallax_offset(&self) -> i32 {
        let offset =
            (self.config.parallax_offset_px() as f32 * self.slide_offset.max(0.0)) as i32;
        if self.geometry.sliding_up {
            -offset
        } else {
            offset
        }
    }

    pub(crate) fn is_drag_handle_under(&self, position: Point) -> bool {
        let point = position.to_int();
        let handle = match self.drag_handle {
            Some(handle) => handle.translate(self.slideable.left, self.slideable.top),
            None => self.slideable,
        };
        handle.contains(point.x, point.y)
    }

    pub(crate) fn is_slideable_under(&self, position: Point) -> bool {
        let point = position.to_int();
        self.slideable.contains(point.x, point.y)
    }

    fn content_rect(m: &PanelMeasurements) -> IntRect {
        IntRect::from_origin_size(
            m.padding.left,
            m.padding.top,
            m.content_width(),
            m.content_height(),
        )
    }

    fn slideable_rect_at(&self, top: i32) -> IntRect {
        let Some(m) = &self.measurements else {
            return IntRect::EMPTY;
        };
        let content = Self::content_rect(m);
        IntRect::new(
            content.left,
            top,
            content.right,
            top + self.geometry.slideable_height,
        )
    }

    /// Main child bounds for the current slideable position. Unless the
    /// panel overlays the content, the main child ends at the collapsed panel
    /// and grows to follow it while the panel hides.
    fn main_rect(&self) -> IntRect {
        let Some(m) = &self.measurements else {
            return IntRect::EMPTY;
        };
        let content = Self::content_rect(m);
        if self.config.overlay_content {
            return content;
        }
        let panel_height = self.geometry.panel_height;
        if self.geometry.sliding_up {
            let bottom = if self.slide_offset <= 0.0 {
                self.slideable.top
            } else {
                content.bottom - panel_height
            };
            IntRect::new(content.left, content.top, content.right, bottom)
        } else {
            let top = self.slideable.bottom;
            let bottom = if self.slide_offset <= 0.0 {
                content.bottom
            } else {
                top + content.height() - panel_height
            };
            IntRect::new(content.left, top, content.right, bottom)
        }
    }

    fn main_clip(&self) -> Option<IntRect> {
        if !self.config.clip_panel {
            return None;
        }
        let mut clip = self.container_bounds();
        if !self.config.overlay_content {
            if self.geometry.sliding_up {
                clip.bottom = clip.bottom.min(self.slideable.top);
            } else {
                clip.top = clip.top.max(self.slideable.bottom);
            }
        }
        Some(clip)
    }

    /// Places both children, deriving the offset from the state on a first
    /// layout.
    pub(crate) fn layout_children(&mut self) -> PanelLayout {
        if self.first_layout {
            self.slide_offset = match self.state {
                PanelState::Expanded => self.config.max_slide_offset,
                PanelState::Anchored => self.config.anchor_point,
                PanelState::Hidden => self.geometry.slide_offset(self.geometry.hidden_top()),
                _ => 0.0,
            };
        }
        self.slideable = self.slideable_rect_at(self.geometry.panel_top(self.slide_offset));
        self.main = self.main_rect();
        if self.first_layout {
            self.update_obscured_visibility();
        }
        self.first_layout = false;
        self.emit_layout()
    }

    pub(crate) fn snapshot_layout(&self) -> PanelLayout {
        let main_translation_y = if self.config.parallax_offset_px() > 0 {
            self.current_parallax_offset()
        } else {
            0
        };
        PanelLayout {
            slideable: self.slideable,
            main: self.main,
            main_translation_y,
            main_clip: self.main_clip(),
            slideable_visible: self.slideable_visible,
            main_visible: self.main_visible,
            slide_offset: self.slide_offset,
        }
    }

    pub(crate) fn emit_layout(&mut self) -> PanelLayout {
        let layout = self.snapshot_layout();
        self.host.on_layout(&layout);
        layout
    }
}

impl DragCallback for PanelCore {
    type Element = PanelChild;

    fn try_capture(&mut self, element: PanelChild, _pointer_id: PointerId) -> bool {
        !self.unable_to_drag && element == PanelChild::Slideable
    }

    fn element_bounds(&self, element: PanelChild) -> IntRect {
        match element {
            PanelChild::Main => self.main,
            PanelChild::Slideable => self.slideable,
        }
    }

    fn offset_element(&mut self, element: PanelChild, dx: i32, dy: i32) {
        match element {
            PanelChild::Main => self.main = self.main.translate(dx, dy),
            PanelChild::Slideable => self.slideable = self.slideable.translate(dx, dy),
        }
    }

    fn find_top_element_under(&self, x: i32, y: i32) -> Option<PanelChild> {
        if self.slideable_visible && self.slideable.contains(x, y) {
            Some(PanelChild::Slideable)
        } else if self.main.contains(x, y) {
            Some(PanelChild::Main)
        } else {
            None
        }
    }

    fn container_bounds(&self) -> IntRect {
        self.measurements
            .map(|m| m.container_bounds())
            .unwrap_or(IntRect::EMPTY)
    }

    fn on_drag_state_changed(&mut self, state: DragState) {
        if state == DragState::Idle {
            self.settle_rest_state();
        }
    }

    fn on_position_changed(&mut self, _element: PanelChild, _left: i32, top: i32, _dx: i32, _dy: i32) {
        self.on_panel_dragged(top);
        self.host.request_redraw();
    }

    fn on_captured(&mut self, _element: PanelChild, _pointer_id: PointerId) {
        self.set_all_children_visible();
        self.enter_dragging();
    }

    fn on_released(&mut self, scope: &mut ReleaseScope<'_>, element: PanelChild, _xvel: f32, yvel: f32) {
        let target = self.release_target(yvel);
        let top = self.geometry.panel_top(target);
        log::debug!(
            "released at offset {:.3} with yvel {yvel}, settling at {target:.3}",
            self.slide_offset
        );
        if scope.settle_captured_at(self.element_bounds(element).left, top) {
            self.host.request_redraw();
        }
    }

    fn vertical_drag_range(&self, _element: PanelChild) -> i32 {
        self.geometry.slide_range()
    }

    fn clamp_vertical(&self, _element: PanelChild, top: i32, _dy: i32) -> i32 {
        self.geometry.clamp_top(top, self.config.max_slide_offset)
    }
}

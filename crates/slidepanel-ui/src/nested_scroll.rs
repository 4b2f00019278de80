//! Hand-off of a touch stream between the panel and a scrollable child
//! inside it.
//!
//! While the child can still scroll toward the collapsed edge it keeps the
//! stream; once it is scrolled to its end the panel takes over and starts
//! collapsing. Dragging the other way, the panel expands first and hands the
//! stream back to the child once fully expanded. Every hand-off is turned
//! into a well-formed stream for the receiver: the loser gets a cancel, the
//! winner a synthesized down.

use std::fmt;
use std::rc::Rc;

use slidepanel_geometry::{IntRect, Point};

use crate::scroll_probe::ScrollPositionProbe;

/// A scrollable element inside the slideable.
#[derive(Clone)]
pub struct ScrollableChild {
    /// Bounds relative to the slideable's top-left corner.
    pub bounds: IntRect,
    pub probe: Rc<dyn ScrollPositionProbe>,
}

impl ScrollableChild {
    pub fn new(bounds: IntRect, probe: Rc<dyn ScrollPositionProbe>) -> Self {
        Self { bounds, probe }
    }
}

impl fmt::Debug for ScrollableChild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollableChild")
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

/// Where a move event goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchRoute {
    /// Regular dispatch: children first, the panel intercepting by its own
    /// rules.
    Default,
    /// Straight to the panel's drag handling.
    Panel,
    /// The child loses the stream: cancel it, then start a drag on the panel
    /// with this event as a down.
    ChildToPanel,
    /// The panel loses the stream: drop its drag, then start the child on
    /// this event as a down.
    PanelToChild,
}

/// Panel facts a routing decision depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelSnapshot {
    /// Container-space position of the gesture's down event.
    pub initial_motion: Point,
    pub slideable: IntRect,
    pub sliding_up: bool,
    pub slide_offset: f32,
    pub max_slide_offset: f32,
    pub panel_dragging: bool,
}

#[derive(Debug, Default)]
pub struct NestedScrollArbiter {
    child: Option<ScrollableChild>,
    child_handling: bool,
    previous: Point,
}

impl NestedScrollArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scrollable(&mut self, child: Option<ScrollableChild>) {
        self.child = child;
        self.child_handling = false;
    }

    pub fn scrollable(&self) -> Option<&ScrollableChild> {
        self.child.as_ref()
    }

    /// Whether the scrollable child currently owns the stream.
    pub fn is_child_handling(&self) -> bool {
        self.child_handling
    }

    pub fn on_down(&mut self, position: Point) {
        self.child_handling = false;
        self.previous = position;
    }

    pub fn route_move(&mut self, position: Point, panel: &PanelSnapshot) -> TouchRoute {
        let dx = position.x - self.previous.x;
        let dy = position.y - self.previous.y;
        self.previous = position;

        if dx.abs() > dy.abs() {
            return TouchRoute::Default;
        }
        let Some(child) = &self.child else {
            return TouchRoute::Default;
        };
        let bounds = child
            .bounds
            .translate(panel.slideable.left, panel.slideable.top);
        let initial = panel.initial_motion.to_int();
        if !bounds.contains(initial.x, initial.y) {
            return TouchRoute::Default;
        }

        let toward_collapse = dy * if panel.sliding_up { 1.0 } else { -1.0 };
        if toward_collapse > 0.0 {
            let scroll = child.probe.scroll_position(panel.sliding_up);
            if scroll > 0 {
                self.child_handling = true;
                return TouchRoute::Default;
            }
            let route = if self.child_handling {
                log::trace!("scrollable exhausted, panel takes the stream");
                TouchRoute::ChildToPanel
            } else {
                TouchRoute::Panel
            };
            self.child_handling = false;
            route
        } else if toward_collapse < 0.0 {
            if panel.slide_offset < panel.max_slide_offset {
                self.child_handling = false;
                return TouchRoute::Panel;
            }
            let route = if !self.child_handling && panel.panel_dragging {
                log::trace!("panel fully expanded, scrollable takes the stream");
                TouchRoute::PanelToChild
            } else {
                TouchRoute::Default
            };
            self.child_handling = true;
            route
        } else {
            TouchRoute::Default
        }
    }
}

//! Sliding panel state machine for a two-child container: a main child and
//! a slideable panel that peeks from the bottom (or top) edge and can be
//! dragged open, flung, anchored halfway, or hidden.
//!
//! The crate is headless. A toolkit adapter implements [`PanelHost`], feeds
//! measurements, touch events and redraw frames into a [`SlidingPanel`], and
//! applies the [`PanelLayout`] it reports back.

pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod layout;
pub mod listeners;
pub mod nested_scroll;
pub mod panel;
pub mod panel_geometry;
pub mod saved_state;
pub mod scroll_probe;
pub mod state;

pub use config::PanelConfig;
pub use controller::{PanelCommand, PanelController};
pub use error::PanelError;
pub use host::{PanelChild, PanelHost};
pub use layout::{Padding, PanelLayout, PanelMeasurements};
pub use listeners::{FadeClickListener, ListenerId, PanelSlideListener};
pub use nested_scroll::{NestedScrollArbiter, PanelSnapshot, ScrollableChild, TouchRoute};
pub use panel::SlidingPanel;
pub use panel_geometry::PanelGeometry;
pub use saved_state::SavedState;
pub use scroll_probe::{ListMetrics, ScrollPositionProbe, ScrollViewMetrics};
pub use state::{Gravity, PanelState};

pub mod prelude {
    pub use crate::config::*;
    pub use crate::controller::PanelController;
    pub use crate::error::PanelError;
    pub use crate::host::{PanelChild, PanelHost};
    pub use crate::layout::{Padding, PanelLayout, PanelMeasurements};
    pub use crate::listeners::{FadeClickListener, ListenerId, PanelSlideListener};
    pub use crate::nested_scroll::ScrollableChild;
    pub use crate::panel::SlidingPanel;
    pub use crate::saved_state::SavedState;
    pub use crate::scroll_probe::{ListMetrics, ScrollPositionProbe, ScrollViewMetrics};
    pub use crate::state::{Gravity, PanelState};
}

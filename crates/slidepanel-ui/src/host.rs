//! The toolkit side of a panel: its two children and the view system
//! hosting them.

use slidepanel_foundation::MotionEvent;

use crate::layout::PanelLayout;

/// The two children of a sliding panel container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelChild {
    /// Content under the panel.
    Main,
    /// The panel that slides over or pushes the main content.
    Slideable,
}

/// Adapter the panel calls back into. All methods default to no-ops so a
/// headless panel can run with `()`.
pub trait PanelHost {
    /// Offers an event to the children. Returns `true` if one of them
    /// consumed it and wants the rest of the stream.
    fn dispatch_to_children(&mut self, _event: &MotionEvent) -> bool {
        false
    }

    /// Children moved or changed visibility.
    fn on_layout(&mut self, _layout: &PanelLayout) {}

    /// Measurements are stale; the host should call `measure` and `layout`
    /// again.
    fn request_layout(&mut self) {}

    /// A settle is running; the host should call `on_frame` on the next
    /// redraw.
    fn request_redraw(&mut self) {}
}

impl PanelHost for () {}

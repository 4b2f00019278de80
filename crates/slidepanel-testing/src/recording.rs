//! Hosts and listeners that record what the panel tells them.

use std::cell::RefCell;
use std::rc::Rc;

use slidepanel_foundation::{MotionAction, MotionEvent};
use slidepanel_ui::{PanelController, PanelHost, PanelLayout, PanelSlideListener, PanelState};

/// Everything a [`RecordingHost`] saw, plus how its fake children behave.
#[derive(Debug, Default)]
pub struct HostRecord {
    /// The main child consumes downs that land on it.
    pub main_consumes: bool,
    /// The slideable consumes downs that land on it.
    pub slideable_consumes: bool,
    /// Actions of every event offered to the children, in order.
    pub child_events: Vec<MotionAction>,
    pub last_layout: Option<PanelLayout>,
    pub layout_count: usize,
    pub layout_requests: usize,
    pub redraw_requests: usize,
}

impl HostRecord {
    pub fn last_child_event(&self) -> Option<MotionAction> {
        self.child_events.last().copied()
    }
}

/// Host whose children are two rectangles taken from the last reported
/// layout. A child that consumed the down receives the rest of the stream.
#[derive(Clone, Default)]
pub struct RecordingHost {
    record: Rc<RefCell<HostRecord>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared view of the record, still readable after the host is boxed
    /// into a panel.
    pub fn record(&self) -> Rc<RefCell<HostRecord>> {
        self.record.clone()
    }
}

impl PanelHost for RecordingHost {
    fn dispatch_to_children(&mut self, event: &MotionEvent) -> bool {
        let mut record = self.record.borrow_mut();
        record.child_events.push(event.action());
        if event.action() != MotionAction::Down {
            return true;
        }
        let Some(layout) = record.last_layout else {
            return false;
        };
        let point = event.position().to_int();
        if layout.slideable_visible && layout.slideable.contains(point.x, point.y) {
            record.slideable_consumes
        } else if layout.main.contains(point.x, point.y) {
            record.main_consumes
        } else {
            false
        }
    }

    fn on_layout(&mut self, layout: &PanelLayout) {
        let mut record = self.record.borrow_mut();
        record.last_layout = Some(*layout);
        record.layout_count += 1;
    }

    fn request_layout(&mut self) {
        self.record.borrow_mut().layout_requests += 1;
    }

    fn request_redraw(&mut self) {
        self.record.borrow_mut().redraw_requests += 1;
    }
}

/// Listener that keeps every slide offset and state change it receives.
#[derive(Debug, Default)]
pub struct RecordingListener {
    slides: RefCell<Vec<f32>>,
    transitions: RefCell<Vec<(PanelState, PanelState)>>,
}

impl RecordingListener {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn slides(&self) -> Vec<f32> {
        self.slides.borrow().clone()
    }

    pub fn transitions(&self) -> Vec<(PanelState, PanelState)> {
        self.transitions.borrow().clone()
    }

    /// States entered, in order.
    pub fn states(&self) -> Vec<PanelState> {
        self.transitions.borrow().iter().map(|(_, new)| *new).collect()
    }

    pub fn clear(&self) {
        self.slides.borrow_mut().clear();
        self.transitions.borrow_mut().clear();
    }
}

impl PanelSlideListener for RecordingListener {
    fn on_panel_slide(&self, _panel: &PanelController, slide_offset: f32) {
        self.slides.borrow_mut().push(slide_offset);
    }

    fn on_panel_state_changed(&self, _panel: &PanelController, previous: PanelState, new: PanelState) {
        self.transitions.borrow_mut().push((previous, new));
    }
}

//! Headless test rule that owns a panel, its clock and a recording host.
//!
//! Gestures are delivered as single-pointer event streams with their own
//! uptime, independent of the frame clock that drives settles.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use slidepanel_animation::ManualFrameClock;
use slidepanel_foundation::{MotionEvent, PointerId};
use slidepanel_ui::{PanelConfig, PanelMeasurements, SlidingPanel};

use crate::recording::{HostRecord, RecordingHost};

pub const CONTAINER_WIDTH: i32 = 400;
pub const CONTAINER_HEIGHT: i32 = 1_000;
pub const SLIDEABLE_HEIGHT: i32 = 900;

/// Frame interval used by [`PanelTestRule::frame`].
pub const FRAME_MS: u64 = 16;

/// Time between consecutive samples of a generated gesture.
pub const EVENT_INTERVAL_MS: u64 = 10;

/// Frames after which [`PanelTestRule::settle`] gives up.
pub const MAX_SETTLE_FRAMES: usize = 200;

const POINTER: PointerId = 0;

pub struct PanelTestRule {
    panel: SlidingPanel,
    clock: ManualFrameClock,
    record: Rc<RefCell<HostRecord>>,
    uptime_ms: u64,
}

impl PanelTestRule {
    /// A 400x1000 container with a 900px slideable, measured and laid out.
    pub fn new(config: PanelConfig) -> Self {
        Self::with_measurements(
            config,
            PanelMeasurements::new(CONTAINER_WIDTH, CONTAINER_HEIGHT)
                .with_slideable_height(SLIDEABLE_HEIGHT),
        )
    }

    pub fn with_measurements(config: PanelConfig, measurements: PanelMeasurements) -> Self {
        let mut rule = Self::unmeasured(config);
        rule.panel.measure(measurements);
        rule.panel.layout();
        rule
    }

    /// A panel that has not been measured yet.
    pub fn unmeasured(config: PanelConfig) -> Self {
        let clock = ManualFrameClock::new(0);
        let host = RecordingHost::new();
        let record = host.record();
        let panel = SlidingPanel::new(config, Rc::new(clock.clone()), Box::new(host));
        Self {
            panel,
            clock,
            record,
            uptime_ms: 0,
        }
    }

    pub fn panel(&self) -> &SlidingPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut SlidingPanel {
        &mut self.panel
    }

    pub fn clock(&self) -> &ManualFrameClock {
        &self.clock
    }

    pub fn host(&self) -> Ref<'_, HostRecord> {
        self.record.borrow()
    }

    pub fn host_mut(&self) -> RefMut<'_, HostRecord> {
        self.record.borrow_mut()
    }

    /// Measures with the default container and lays out again.
    pub fn relayout(&mut self) {
        self.panel.measure(
            PanelMeasurements::new(CONTAINER_WIDTH, CONTAINER_HEIGHT)
                .with_slideable_height(SLIDEABLE_HEIGHT),
        );
        self.panel.layout();
    }

    /// Advances the clock by one frame and runs it. Returns whether the panel
    /// wants another frame.
    pub fn frame(&mut self) -> bool {
        self.clock.advance(FRAME_MS);
        self.panel.on_frame()
    }

    /// Runs frames until the panel stops settling. Returns the number of
    /// frames it took.
    pub fn settle(&mut self) -> usize {
        for frame in 1..=MAX_SETTLE_FRAMES {
            if !self.frame() {
                return frame;
            }
        }
        panic!("panel still settling after {MAX_SETTLE_FRAMES} frames");
    }

    pub fn send(&mut self, event: MotionEvent) -> bool {
        log::trace!("test event {event:?}");
        self.panel.dispatch_touch_event(&event)
    }

    pub fn down(&mut self, x: f32, y: f32) -> bool {
        self.uptime_ms += EVENT_INTERVAL_MS;
        self.send(MotionEvent::down(POINTER, x, y, self.uptime_ms))
    }

    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.uptime_ms += EVENT_INTERVAL_MS;
        self.send(MotionEvent::moved(POINTER, x, y, self.uptime_ms))
    }

    /// Lifts the pointer at the time of the last sample, keeping its
    /// velocity.
    pub fn up(&mut self, x: f32, y: f32) -> bool {
        self.send(MotionEvent::up(POINTER, x, y, self.uptime_ms))
    }

    /// Lifts the pointer after a pause long enough to kill its velocity.
    pub fn up_still(&mut self, x: f32, y: f32) -> bool {
        self.uptime_ms += 100;
        self.send(MotionEvent::up(POINTER, x, y, self.uptime_ms))
    }

    pub fn cancel(&mut self, x: f32, y: f32) -> bool {
        self.send(MotionEvent::cancel(POINTER, x, y, self.uptime_ms))
    }

    /// Down at `from`, then `steps` evenly spaced moves ending at `to`. The
    /// pointer stays down.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) {
        self.down(from.0, from.1);
        self.move_by_steps(from, to, steps);
    }

    pub fn move_by_steps(&mut self, from: (f32, f32), to: (f32, f32), steps: usize) {
        let steps = steps.max(1);
        for i in 1..=steps {
            // Multiply before dividing so whole-pixel paths stay exact.
            let x = from.0 + (to.0 - from.0) * i as f32 / steps as f32;
            let y = from.1 + (to.1 - from.1) * i as f32 / steps as f32;
            self.move_to(x, y);
        }
    }

    /// A drag released with its velocity intact.
    pub fn fling(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.drag(from, to, 10);
        self.up(to.0, to.1);
    }

    /// A drag that comes to rest before the pointer lifts.
    pub fn swipe(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.drag(from, to, 10);
        self.up_still(to.0, to.1);
    }

    /// Down and up on the same spot.
    pub fn tap(&mut self, x: f32, y: f32) {
        self.down(x, y);
        self.up(x, y);
    }
}

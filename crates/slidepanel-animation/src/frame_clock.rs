//! Time sources for the settle engine.
//!
//! The engine never sleeps; the host calls `tick` once per redraw and the
//! clock answers "what time is it now".

use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

pub trait FrameClock {
    /// Milliseconds elapsed since an arbitrary, fixed origin.
    fn now_millis(&self) -> u64;
}

/// Wall clock backed by `web_time::Instant`, usable on native and wasm.
#[derive(Clone, Copy, Debug)]
pub struct SystemFrameClock {
    origin: Instant,
}

impl SystemFrameClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemFrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemFrameClock {
    fn now_millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualFrameClock {
    now: Rc<Cell<u64>>,
}

impl ManualFrameClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_millis)),
        }
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get() + millis);
    }

    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }
}

impl FrameClock for ManualFrameClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

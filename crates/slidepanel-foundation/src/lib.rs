//! Foundation of the sliding panel core: pointer input, velocity and motion
//! tracking, and the drag arbiter that owns touch streams.

pub mod config;
pub mod drag_arbiter;
pub mod edges;
pub mod error;
pub mod gesture_constants;
pub mod input;
pub mod motion_tracker;
pub mod velocity_tracker;

pub use config::DragConfig;
pub use drag_arbiter::{DragArbiter, DragCallback, DragState, ReleaseScope};
pub use edges::{Directions, EdgeFlags};
pub use error::DragError;
pub use input::{MotionAction, MotionEvent, PointerId, PointerSample};
pub use motion_tracker::MotionTracker;
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::config::DragConfig;
    pub use crate::drag_arbiter::{DragArbiter, DragCallback, DragState, ReleaseScope};
    pub use crate::edges::{Directions, EdgeFlags};
    pub use crate::error::DragError;
    pub use crate::gesture_constants::*;
    pub use crate::input::prelude::*;
}

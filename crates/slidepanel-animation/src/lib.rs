//! Settle animation for the sliding panel core
//!
//! This crate provides the easing curves, frame clocks and the settle engine
//! that carries a released panel to its resting position one frame at a time.

pub mod easing;
pub mod frame_clock;
pub mod settle;

pub use easing::{CubicBezier, Easing, Interpolator};
pub use frame_clock::{FrameClock, ManualFrameClock, SystemFrameClock};
pub use settle::{
    clamp_mag, compute_settle_duration, SettleEngine, SettleSpec, SettleTick, Trajectory,
    BASE_SETTLE_DURATION_MS, MAX_SETTLE_DURATION_MS,
};

pub mod prelude {
    pub use crate::easing::{CubicBezier, Easing, Interpolator};
    pub use crate::frame_clock::{FrameClock, ManualFrameClock, SystemFrameClock};
    pub use crate::settle::{SettleEngine, SettleSpec, SettleTick};
}

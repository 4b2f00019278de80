//! Shared gesture constants for consistent touch handling.
//!
//! All values are in density-independent pixels (or dp per second) and are
//! scaled by the display density in [`DragConfig::for_density`].
//!
//! [`DragConfig::for_density`]: crate::DragConfig::for_density

/// Distance a pointer must travel before a motion counts as a drag.
///
/// Matches the platform default touch slop on touch screens; small enough to
/// feel responsive, large enough to ignore finger jitter on a tap.
pub const TOUCH_SLOP: f32 = 8.0;

/// Width of the band along each container edge inside which a down event
/// counts as an edge touch.
pub const EDGE_SIZE: f32 = 20.0;

/// Velocities below this magnitude are treated as no fling at all.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in dp per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

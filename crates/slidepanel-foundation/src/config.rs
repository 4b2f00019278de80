use slidepanel_geometry::Dp;

use crate::gesture_constants::{EDGE_SIZE, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY, TOUCH_SLOP};

/// Pixel thresholds used by the drag arbiter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    /// Distance in pixels a pointer must travel before a drag may begin.
    pub touch_slop: i32,
    /// Edge band width in pixels.
    pub edge_size: i32,
    /// Velocity magnitude in px/s below which a release counts as still.
    pub min_velocity: f32,
    /// Velocity magnitude cap in px/s.
    pub max_velocity: f32,
}

impl DragConfig {
    /// Scales the default dp thresholds to pixels.
    pub fn for_density(density: f32) -> Self {
        Self {
            touch_slop: Dp(TOUCH_SLOP).round_to_px(density),
            edge_size: Dp(EDGE_SIZE).round_to_px(density),
            min_velocity: Dp(MIN_FLING_VELOCITY).to_px(density),
            max_velocity: Dp(MAX_FLING_VELOCITY).to_px(density),
        }
    }

    /// Scales the touch slop by `1 / sensitivity`; values above 1 make drags
    /// start sooner. Non-positive sensitivities are ignored.
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        if sensitivity > 0.0 {
            self.touch_slop = (self.touch_slop as f32 * (1.0 / sensitivity)) as i32;
        } else {
            log::warn!("ignoring non-positive drag sensitivity {sensitivity}");
        }
        self
    }

    pub fn with_min_velocity(mut self, min_velocity: f32) -> Self {
        self.min_velocity = min_velocity;
        self
    }

    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self::for_density(1.0)
    }
}

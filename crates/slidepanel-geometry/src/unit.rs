//! Density-independent pixels and their conversion to device pixels

/// Density-independent pixels
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(&self, density: f32) -> f32 {
        self.0 * density
    }

    /// Rounds to the nearest whole pixel the way toolkits size dimensions.
    pub fn round_to_px(&self, density: f32) -> i32 {
        (self.0 * density + 0.5) as i32
    }
}

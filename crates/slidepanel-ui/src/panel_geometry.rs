//! Affine map between the normalized slide offset and the panel's top edge.

/// Vertical geometry the offset map depends on, all in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PanelGeometry {
    pub container_height: i32,
    pub padding_top: i32,
    pub padding_bottom: i32,
    /// Visible height of the collapsed panel.
    pub panel_height: i32,
    pub slideable_height: i32,
    pub sliding_up: bool,
}

impl PanelGeometry {
    /// Pixel travel between collapsed (offset 0) and fully expanded (offset 1).
    pub fn slide_range(&self) -> i32 {
        self.slideable_height - self.panel_height
    }

    /// Top edge of the slideable at `offset`.
    pub fn panel_top(&self, offset: f32) -> i32 {
        let slide_px = (offset * self.slide_range() as f32).round() as i32;
        if self.sliding_up {
            self.container_height - self.padding_bottom - self.panel_height - slide_px
        } else {
            self.padding_top - self.slideable_height + self.panel_height + slide_px
        }
    }

    /// Inverse of [`panel_top`](Self::panel_top). A zero range maps every
    /// position to offset `0`.
    pub fn slide_offset(&self, top: i32) -> f32 {
        let range = self.slide_range();
        if range <= 0 {
            return 0.0;
        }
        let collapsed = self.collapsed_top();
        let travelled = if self.sliding_up {
            collapsed - top
        } else {
            top - collapsed
        };
        travelled as f32 / range as f32
    }

    pub fn collapsed_top(&self) -> i32 {
        self.panel_top(0.0)
    }

    /// Collapsed position pushed one panel height past the resting edge.
    pub fn hidden_top(&self) -> i32 {
        if self.sliding_up {
            self.collapsed_top() + self.panel_height
        } else {
            self.collapsed_top() - self.panel_height
        }
    }

    /// Keeps `top` between the collapsed position and the position at
    /// `max_offset`.
    pub fn clamp_top(&self, top: i32, max_offset: f32) -> i32 {
        let collapsed = self.collapsed_top();
        let expanded = self.panel_top(max_offset);
        if self.sliding_up {
            top.max(expanded).min(collapsed)
        } else {
            top.max(collapsed).min(expanded)
        }
    }
}

#[cfg(test)]
#[path = "tests/panel_geometry_tests.rs"]
mod tests;

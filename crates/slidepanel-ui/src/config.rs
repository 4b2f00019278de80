//! Panel configuration and its defaults.

use slidepanel_animation::Easing;
use slidepanel_foundation::DragConfig;
use slidepanel_geometry::Dp;

use crate::state::{Gravity, PanelState};

/// Height of the collapsed panel peeking into the container.
pub const DEFAULT_PANEL_HEIGHT: f32 = 68.0;

/// An anchor of `1.0` means no intermediate rest position.
pub const DEFAULT_ANCHOR_POINT: f32 = 1.0;

pub const DEFAULT_MAX_SLIDE_OFFSET: f32 = 1.0;

/// Releases slower than this (dp per second) count as still.
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 400.0;

pub const DEFAULT_PARALLAX_OFFSET: f32 = 0.0;

/// Touch slop multiplier; the panel waits for twice the platform slop.
pub const DEFAULT_SENSITIVITY: f32 = 0.5;

/// Key of the panel state inside persisted host state.
pub const SLIDING_STATE_KEY: &str = "sliding_state";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelConfig {
    /// Collapsed panel height in dp.
    pub panel_height: f32,
    /// Maximum parallax shift of the main content in dp. `0` disables it.
    pub parallax_offset: f32,
    /// Fling threshold in dp per second.
    pub min_fling_velocity: f32,
    pub anchor_point: f32,
    pub max_slide_offset: f32,
    pub initial_state: PanelState,
    pub gravity: Gravity,
    /// Panel slides over the main content instead of shrinking it.
    pub overlay_content: bool,
    /// Clip the main content at the panel edge.
    pub clip_panel: bool,
    pub sensitivity: f32,
    /// Display density used to convert dp to pixels.
    pub density: f32,
    pub easing: Easing,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            panel_height: DEFAULT_PANEL_HEIGHT,
            parallax_offset: DEFAULT_PARALLAX_OFFSET,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            anchor_point: DEFAULT_ANCHOR_POINT,
            max_slide_offset: DEFAULT_MAX_SLIDE_OFFSET,
            initial_state: PanelState::Collapsed,
            gravity: Gravity::Bottom,
            overlay_content: false,
            clip_panel: true,
            sensitivity: DEFAULT_SENSITIVITY,
            density: 1.0,
            easing: Easing::QuinticEaseOut,
        }
    }
}

impl PanelConfig {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_panel_height(mut self, panel_height: f32) -> Self {
        self.panel_height = panel_height;
        self
    }

    pub fn with_parallax_offset(mut self, parallax_offset: f32) -> Self {
        self.parallax_offset = parallax_offset;
        self
    }

    pub fn with_min_fling_velocity(mut self, min_fling_velocity: f32) -> Self {
        self.min_fling_velocity = min_fling_velocity;
        self
    }

    pub fn with_anchor_point(mut self, anchor_point: f32) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    pub fn with_max_slide_offset(mut self, max_slide_offset: f32) -> Self {
        self.max_slide_offset = max_slide_offset;
        self
    }

    pub fn with_initial_state(mut self, initial_state: PanelState) -> Self {
        self.initial_state = initial_state;
        self
    }

    pub fn with_gravity(mut self, gravity: Gravity) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_overlay_content(mut self, overlay_content: bool) -> Self {
        self.overlay_content = overlay_content;
        self
    }

    pub fn with_clip_panel(mut self, clip_panel: bool) -> Self {
        self.clip_panel = clip_panel;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Collapsed panel height in pixels, rounded like layout dimensions.
    pub fn panel_height_px(&self) -> i32 {
        Dp(self.panel_height).round_to_px(self.density)
    }

    pub fn parallax_offset_px(&self) -> i32 {
        Dp(self.parallax_offset).to_px(self.density) as i32
    }

    /// Drag thresholds for the panel's arbiter.
    pub fn drag_config(&self) -> DragConfig {
        DragConfig::for_density(self.density)
            .with_sensitivity(self.sensitivity)
            .with_min_velocity(Dp(self.min_fling_velocity).to_px(self.density))
    }
}

//! Headless measure/layout results exchanged with the host.

use slidepanel_geometry::IntRect;

/// Insets of the container's content area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Padding {
    pub const fn all(value: i32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// Sizes the host measured for the container and its two children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PanelMeasurements {
    pub width: i32,
    pub height: i32,
    pub padding: Padding,
    /// Desired height of the slideable; `None` fills the content height.
    pub slideable_height: Option<i32>,
    /// Whether the slideable is shown at all. A gone slideable puts the panel
    /// in the hidden state.
    pub slideable_visible: bool,
    /// Whether the slideable paints an opaque background, which lets the
    /// panel hide a fully covered main child.
    pub slideable_opaque: bool,
}

impl PanelMeasurements {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            padding: Padding::default(),
            slideable_height: None,
            slideable_visible: true,
            slideable_opaque: false,
        }
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_slideable_height(mut self, height: i32) -> Self {
        self.slideable_height = Some(height);
        self
    }

    pub fn with_slideable_visible(mut self, visible: bool) -> Self {
        self.slideable_visible = visible;
        self
    }

    pub fn with_slideable_opaque(mut self, opaque: bool) -> Self {
        self.slideable_opaque = opaque;
        self
    }

    pub fn content_width(&self) -> i32 {
        self.width - self.padding.left - self.padding.right
    }

    pub fn content_height(&self) -> i32 {
        self.height - self.padding.top - self.padding.bottom
    }

    pub fn container_bounds(&self) -> IntRect {
        IntRect::new(0, 0, self.width, self.height)
    }
}

/// Placement of both children, reported to the host whenever it changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelLayout {
    pub slideable: IntRect,
    pub main: IntRect,
    /// Vertical parallax translation to apply to the main child.
    pub main_translation_y: i32,
    /// Region of the main child left uncovered by the panel, when clipping
    /// is enabled.
    pub main_clip: Option<IntRect>,
    pub slideable_visible: bool,
    pub main_visible: bool,
    pub slide_offset: f32,
}

use std::fmt;
use std::str::FromStr;

use slidepanel_foundation::EdgeFlags;

use crate::error::PanelError;

/// Discrete position of the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PanelState {
    Expanded,
    #[default]
    Collapsed,
    Anchored,
    Hidden,
    /// Transient: the panel is following a pointer or animating. Never
    /// accepted by [`crate::SlidingPanel::set_panel_state`].
    Dragging,
}

impl PanelState {
    pub const ALL: [PanelState; 5] = [
        PanelState::Expanded,
        PanelState::Collapsed,
        PanelState::Anchored,
        PanelState::Hidden,
        PanelState::Dragging,
    ];

    /// Name used when the state is persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelState::Expanded => "EXPANDED",
            PanelState::Collapsed => "COLLAPSED",
            PanelState::Anchored => "ANCHORED",
            PanelState::Hidden => "HIDDEN",
            PanelState::Dragging => "DRAGGING",
        }
    }

    /// Expanded or anchored.
    pub fn is_open(&self) -> bool {
        matches!(self, PanelState::Expanded | PanelState::Anchored)
    }
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PanelState {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| PanelError::UnknownPanelState(s.to_owned()))
    }
}

/// Container edge the collapsed panel rests against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Gravity {
    /// Panel peeks from the top edge and slides down.
    Top,
    /// Panel peeks from the bottom edge and slides up.
    #[default]
    Bottom,
}

impl Gravity {
    pub fn is_sliding_up(&self) -> bool {
        *self == Gravity::Bottom
    }
}

impl TryFrom<EdgeFlags> for Gravity {
    type Error = PanelError;

    fn try_from(edges: EdgeFlags) -> Result<Self, Self::Error> {
        if edges == EdgeFlags::TOP {
            Ok(Gravity::Top)
        } else if edges == EdgeFlags::BOTTOM {
            Ok(Gravity::Bottom)
        } else {
            Err(PanelError::InvalidGravity { edges })
        }
    }
}

use slidepanel_foundation::EdgeFlags;

/// Errors raised by the panel's public API.
///
/// All of these indicate integration bugs; runtime touch failures are never
/// surfaced here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// `Dragging` is entered by gestures only.
    DraggingNotSettable,
    /// The panel can only rest against the top or bottom edge.
    InvalidGravity { edges: EdgeFlags },
    /// Persisted entries did not contain the panel state key.
    MissingSavedState,
    /// A persisted panel state name was not recognized.
    UnknownPanelState(String),
}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::DraggingNotSettable => {
                write!(f, "panel state can't be DRAGGING during state set")
            }
            PanelError::InvalidGravity { edges } => write!(
                f,
                "gravity must be set to either top or bottom (got edges {:#06b})",
                edges.bits()
            ),
            PanelError::MissingSavedState => write!(f, "saved state has no panel state entry"),
            PanelError::UnknownPanelState(name) => write!(f, "unknown panel state {name:?}"),
        }
    }
}

impl std::error::Error for PanelError {}

use crate::input::PointerId;

/// Failures raised while processing a live touch stream.
///
/// These never escape the panel's outermost touch entry point; they are
/// logged there and the offending event is reported as not consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragError {
    /// The event references a pointer the arbiter has no motion history for.
    PointerNotTracked { pointer_id: PointerId },
    /// A dragging operation ran without a captured element.
    NoCapturedElement,
}

impl std::fmt::Display for DragError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DragError::PointerNotTracked { pointer_id } => {
                write!(f, "pointer {pointer_id} is not tracked in this gesture")
            }
            DragError::NoCapturedElement => write!(f, "drag in progress without a captured element"),
        }
    }
}

impl std::error::Error for DragError {}

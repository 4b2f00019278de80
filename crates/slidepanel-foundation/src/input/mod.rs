pub mod types;

pub use types::{MotionAction, MotionEvent, PointerId, PointerSample};

pub mod prelude {
    pub use super::types::{MotionAction, MotionEvent, PointerId, PointerSample};
}

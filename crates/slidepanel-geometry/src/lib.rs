//! Pure geometry and unit types for the sliding panel core
//!
//! Pointer coordinates are fractional (`Point`), element placement is in
//! whole pixels (`IntPoint`, `IntRect`), the same split a view toolkit makes
//! between touch samples and laid-out children.

mod geometry;
mod unit;

pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::{IntPoint, IntRect, Point};
    pub use crate::unit::Dp;
}

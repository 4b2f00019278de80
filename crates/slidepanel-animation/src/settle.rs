//! Settle engine: carries an element from its release position to a rest
//! position along an eased trajectory.
//!
//! The host drives the engine cooperatively. After [`SettleEngine::begin`]
//! returns `true`, [`SettleEngine::tick`] must be called once per redraw until
//! it reports `finished`.

use std::rc::Rc;

use slidepanel_geometry::IntPoint;

use crate::easing::{Easing, Interpolator};
use crate::frame_clock::FrameClock;

/// Base duration for a settle with no fling velocity, scaled by distance.
pub const BASE_SETTLE_DURATION_MS: u32 = 256;

/// Upper bound for any settle, regardless of distance or velocity.
pub const MAX_SETTLE_DURATION_MS: u32 = 600;

/// Inputs to the duration model that do not change between settles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SettleSpec {
    /// Draggable range on the x axis; `0` means the axis is not draggable.
    pub horizontal_range: i32,
    /// Draggable range on the y axis; `0` means the axis is not draggable.
    pub vertical_range: i32,
    /// Reference travel distance (the container width) used to shape
    /// velocity-driven durations.
    pub reference_width: i32,
    /// Velocities below this magnitude count as no velocity at all.
    pub min_velocity: f32,
    /// Velocities are capped at this magnitude.
    pub max_velocity: f32,
}

/// A settle in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trajectory {
    pub start: IntPoint,
    pub target: IntPoint,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub duration_ms: u32,
    pub start_time_ms: u64,
}

impl Trajectory {
    fn position_at(&self, progress: f32) -> IntPoint {
        let dx = (self.target.x - self.start.x) as f32;
        let dy = (self.target.y - self.start.y) as f32;
        IntPoint::new(
            self.start.x + (progress * dx).round() as i32,
            self.start.y + (progress * dy).round() as i32,
        )
    }
}

/// Result of advancing the engine to the current frame time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleTick {
    pub position: IntPoint,
    pub finished: bool,
}

pub struct SettleEngine {
    clock: Rc<dyn FrameClock>,
    interpolator: Rc<dyn Interpolator>,
    trajectory: Option<Trajectory>,
    current: IntPoint,
}

impl SettleEngine {
    /// Creates an idle engine easing with [`Easing::QuinticEaseOut`].
    pub fn new(clock: Rc<dyn FrameClock>) -> Self {
        Self {
            clock,
            interpolator: Rc::new(Easing::QuinticEaseOut),
            trajectory: None,
            current: IntPoint::ZERO,
        }
    }

    /// Replaces the easing curve used by subsequent settles.
    pub fn with_interpolator(mut self, interpolator: Rc<dyn Interpolator>) -> Self {
        self.interpolator = interpolator;
        self
    }

    pub fn set_interpolator(&mut self, interpolator: Rc<dyn Interpolator>) {
        self.interpolator = interpolator;
    }

    /// Starts a settle from `start` to `target`, deriving the duration from
    /// the distance and the release velocity.
    ///
    /// Returns `false` without animating when the element is already at the
    /// target; any previous trajectory is dropped in that case too.
    pub fn begin(
        &mut self,
        start: IntPoint,
        target: IntPoint,
        velocity_x: f32,
        velocity_y: f32,
        spec: &SettleSpec,
    ) -> bool {
        let dx = target.x - start.x;
        let dy = target.y - start.y;
        if dx == 0 && dy == 0 {
            self.abort();
            self.current = start;
            return false;
        }
        let duration =
            compute_settle_duration(dx, dy, velocity_x as i32, velocity_y as i32, spec);
        self.start(start, target, velocity_x, velocity_y, duration);
        true
    }

    /// Starts a settle with an explicit duration.
    pub fn start(
        &mut self,
        start: IntPoint,
        target: IntPoint,
        velocity_x: f32,
        velocity_y: f32,
        duration_ms: u32,
    ) {
        log::trace!("settle {start:?} -> {target:?} over {duration_ms}ms");
        self.current = start;
        self.trajectory = Some(Trajectory {
            start,
            target,
            velocity_x,
            velocity_y,
            duration_ms,
            start_time_ms: self.clock.now_millis(),
        });
    }

    /// Advances the trajectory to the clock's current time.
    ///
    /// Once finished the trajectory is dropped and further ticks return the
    /// final position unchanged.
    pub fn tick(&mut self) -> SettleTick {
        let Some(trajectory) = self.trajectory else {
            return SettleTick {
                position: self.current,
                finished: true,
            };
        };

        let elapsed = self
            .clock
            .now_millis()
            .saturating_sub(trajectory.start_time_ms);
        if elapsed >= u64::from(trajectory.duration_ms) {
            self.current = trajectory.target;
        } else {
            let fraction = elapsed as f32 / trajectory.duration_ms as f32;
            let progress = self.interpolator.interpolate(fraction);
            self.current = trajectory.position_at(progress);
        }

        let finished = self.current == trajectory.target;
        if finished {
            self.trajectory = None;
        }
        SettleTick {
            position: self.current,
            finished,
        }
    }

    /// Terminates the trajectory, leaving the position at the value computed
    /// by the most recent tick.
    pub fn abort(&mut self) {
        if self.trajectory.take().is_some() {
            log::trace!("settle aborted at {:?}", self.current);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.trajectory.is_none()
    }

    pub fn current(&self) -> IntPoint {
        self.current
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    pub fn final_position(&self) -> Option<IntPoint> {
        self.trajectory.map(|t| t.target)
    }
}

/// Computes a settle duration for a 2-D motion.
///
/// Each axis gets its own duration; the two are blended by the axis's share
/// of total absolute velocity, or of total absolute distance for an axis that
/// carries no velocity.
pub fn compute_settle_duration(dx: i32, dy: i32, xvel: i32, yvel: i32, spec: &SettleSpec) -> u32 {
    let min = spec.min_velocity as i32;
    let max = spec.max_velocity as i32;
    let xvel = clamp_mag(xvel, min, max);
    let yvel = clamp_mag(yvel, min, max);

    let abs_dx = dx.abs() as f32;
    let abs_dy = dy.abs() as f32;
    let abs_xvel = xvel.abs() as f32;
    let abs_yvel = yvel.abs() as f32;
    let added_vel = abs_xvel + abs_yvel;
    let added_distance = abs_dx + abs_dy;
    if added_distance == 0.0 {
        return 0;
    }

    let x_weight = if xvel != 0 {
        abs_xvel / added_vel
    } else {
        abs_dx / added_distance
    };
    let y_weight = if yvel != 0 {
        abs_yvel / added_vel
    } else {
        abs_dy / added_distance
    };

    let x_duration = compute_axis_duration(dx, xvel, spec.horizontal_range, spec.reference_width);
    let y_duration = compute_axis_duration(dy, yvel, spec.vertical_range, spec.reference_width);
    (x_duration as f32 * x_weight + y_duration as f32 * y_weight) as u32
}

fn compute_axis_duration(delta: i32, velocity: i32, motion_range: i32, reference_width: i32) -> u32 {
    if delta == 0 {
        return 0;
    }

    let velocity = velocity.abs();
    let duration = if velocity > 0 {
        let width = reference_width.max(1) as f32;
        let half_width = width / 2.0;
        let distance_ratio = (delta.abs() as f32 / width).min(1.0);
        let distance = half_width + half_width * distance_influence_for_snap_duration(distance_ratio);
        4 * (1000.0 * (distance / velocity as f32).abs()).round() as u32
    } else if motion_range > 0 {
        let range = delta.abs() as f32 / motion_range as f32;
        ((range + 1.0) * BASE_SETTLE_DURATION_MS as f32) as u32
    } else {
        MAX_SETTLE_DURATION_MS
    };
    duration.min(MAX_SETTLE_DURATION_MS)
}

/// Eases the influence of travel distance on a velocity-driven duration so
/// that short and long settles feel alike.
fn distance_influence_for_snap_duration(value: f32) -> f32 {
    let centered = (value - 0.5) * (0.3 * std::f32::consts::PI / 2.0);
    centered.sin()
}

/// Zeroes magnitudes below `abs_min` and caps magnitudes above `abs_max`,
/// preserving sign.
pub fn clamp_mag(value: i32, abs_min: i32, abs_max: i32) -> i32 {
    let abs_value = value.abs();
    if abs_value < abs_min {
        0
    } else if abs_value > abs_max {
        if value > 0 {
            abs_max
        } else {
            -abs_max
        }
    } else {
        value
    }
}

#[cfg(test)]
#[path = "tests/settle_tests.rs"]
mod tests;

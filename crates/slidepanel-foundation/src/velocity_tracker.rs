//! Release velocity estimation.
//!
//! Each axis of each pointer gets a [`VelocityTracker1D`], which estimates
//! velocity with the impulse strategy: the kinetic energy imparted by the
//! recent samples is converted back into a velocity. Only samples within a
//! short horizon count, and a pause between samples cuts the history off.

use smallvec::SmallVec;

use crate::input::{MotionAction, MotionEvent, PointerId};

/// Ring buffer capacity per axis.
const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: u64 = 100;

/// A gap this long between consecutive samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Default, Debug)]
struct Sample {
    time_ms: u64,
    value: f32,
}

/// Velocity estimate for absolute positions along one axis.
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_data_point(&mut self, time_ms: u64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample {
            time_ms,
            value: position,
        });
    }

    /// Velocity in units per second; `0.0` with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let recent = self.recent_samples();
        if recent.len() < 2 {
            return 0.0;
        }
        impulse_velocity(&recent) * 1000.0
    }

    /// Newest first as `(age, value)`, ages in non-positive ms. Stops at the
    /// horizon or at the first pause.
    fn recent_samples(&self) -> SmallVec<[(f32, f32); HISTORY_SIZE]> {
        let mut recent = SmallVec::new();
        let Some(newest) = self.samples[self.newest] else {
            return recent;
        };
        let mut previous_time = newest.time_ms;
        for step in 0..HISTORY_SIZE {
            let index = (self.newest + HISTORY_SIZE - step) % HISTORY_SIZE;
            let Some(sample) = self.samples[index] else {
                break;
            };
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || previous_time.abs_diff(sample.time_ms) > ASSUME_STOPPED_MS {
                break;
            }
            previous_time = sample.time_ms;
            recent.push((-(age as f32), sample.value));
        }
        recent
    }

    /// Velocity in units per second with its magnitude capped at
    /// `max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// Accumulates the work done between consecutive samples, oldest pair
/// first, and converts it back into a velocity in units per ms.
fn impulse_velocity(recent: &[(f32, f32)]) -> f32 {
    let oldest_pair = recent.len() - 2;
    let mut work = 0.0f32;
    for (pair_index, pair) in recent.windows(2).enumerate().rev() {
        let (newer_age, newer_value) = pair[0];
        let (older_age, older_value) = pair[1];
        let dt = newer_age - older_age;
        if dt == 0.0 {
            continue;
        }
        let velocity = (newer_value - older_value) / dt;
        work += (velocity - kinetic_energy_to_velocity(work)) * velocity.abs();
        if pair_index == oldest_pair {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with unit mass.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[derive(Clone, Debug)]
struct PointerVelocity {
    id: PointerId,
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

/// Two-axis velocity tracking for every pointer of a gesture.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    pointers: SmallVec<[PointerVelocity; 4]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds every pointer of `event`. A `Down` starts a fresh gesture.
    pub fn add_movement(&mut self, event: &MotionEvent) {
        if event.action() == MotionAction::Down {
            self.clear();
        }
        let time = event.uptime_ms();
        for sample in event.pointers() {
            let entry = match self.pointers.iter().position(|p| p.id == sample.id) {
                Some(index) => &mut self.pointers[index],
                None => {
                    self.pointers.push(PointerVelocity {
                        id: sample.id,
                        x: VelocityTracker1D::new(),
                        y: VelocityTracker1D::new(),
                    });
                    let last = self.pointers.len() - 1;
                    &mut self.pointers[last]
                }
            };
            entry.x.add_data_point(time, sample.position.x);
            entry.y.add_data_point(time, sample.position.y);
        }
    }

    /// `(vx, vy)` in px/s for `pointer_id`, each capped at `max_velocity`.
    /// Unknown pointers have zero velocity.
    pub fn velocity(&self, pointer_id: PointerId, max_velocity: f32) -> (f32, f32) {
        self.pointers
            .iter()
            .find(|p| p.id == pointer_id)
            .map(|p| {
                (
                    p.x.calculate_velocity_with_max(max_velocity),
                    p.y.calculate_velocity_with_max(max_velocity),
                )
            })
            .unwrap_or((0.0, 0.0))
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }
}

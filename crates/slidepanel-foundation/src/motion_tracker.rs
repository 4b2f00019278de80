//! Per-pointer motion history for the drag arbiter.
//!
//! For every pointer that is down the tracker remembers where it started,
//! where it was last seen and which container edges it started near. It also
//! owns the velocity tracker that produces release velocities.

use slidepanel_geometry::{IntRect, Point};

use crate::edges::{Directions, EdgeFlags};
use crate::input::{MotionEvent, PointerId};
use crate::velocity_tracker::VelocityTracker;

/// Pointer ids at or above this value are not tracked.
pub const MAX_TRACKED_POINTERS: PointerId = 64;

#[derive(Clone, Copy, Debug, Default)]
struct PointerMotion {
    initial: Point,
    last: Point,
    edges_touched: EdgeFlags,
    edge_drags_in_progress: EdgeFlags,
    edges_locked: EdgeFlags,
}

pub struct MotionTracker {
    pointers: Vec<PointerMotion>,
    pointers_down: u64,
    velocity: VelocityTracker,
    edge_size: i32,
    min_velocity: f32,
}

impl MotionTracker {
    pub fn new(edge_size: i32, min_velocity: f32) -> Self {
        Self {
            pointers: Vec::new(),
            pointers_down: 0,
            velocity: VelocityTracker::new(),
            edge_size,
            min_velocity,
        }
    }

    pub fn edge_size(&self) -> i32 {
        self.edge_size
    }

    pub fn min_velocity(&self) -> f32 {
        self.min_velocity
    }

    pub fn set_min_velocity(&mut self, min_velocity: f32) {
        self.min_velocity = min_velocity;
    }

    /// Starts tracking `id` at `position` and returns the edges of
    /// `container` it landed near.
    pub fn record_initial(&mut self, id: PointerId, position: Point, container: IntRect) -> EdgeFlags {
        let edges = self.edges_near(position, container);
        let Some(motion) = self.slot_mut(id) else {
            log::trace!("pointer {id} is beyond the tracked range");
            return EdgeFlags::NONE;
        };
        *motion = PointerMotion {
            initial: position,
            last: position,
            edges_touched: edges,
            ..PointerMotion::default()
        };
        self.pointers_down |= 1 << id;
        edges
    }

    /// Updates the last known position of every tracked pointer in `event`.
    pub fn record_move(&mut self, event: &MotionEvent) {
        for sample in event.pointers() {
            if !self.is_pointer_down(sample.id) {
                log::trace!("ignoring move for untracked pointer {}", sample.id);
                continue;
            }
            if let Some(motion) = self.pointers.get_mut(sample.id as usize) {
                motion.last = sample.position;
            }
        }
    }

    pub fn add_movement(&mut self, event: &MotionEvent) {
        self.velocity.add_movement(event);
    }

    /// Release velocity of `id` in px/s. Each axis is capped at
    /// `max_velocity` and zeroed below the minimum velocity.
    pub fn velocity(&self, id: PointerId, max_velocity: f32) -> (f32, f32) {
        let (vx, vy) = self.velocity.velocity(id, max_velocity);
        (
            zero_below(vx, self.min_velocity),
            zero_below(vy, self.min_velocity),
        )
    }

    /// Forgets every pointer and the velocity history.
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.pointers_down = 0;
        self.velocity.clear();
    }

    pub fn clear_pointer(&mut self, id: PointerId) {
        if !self.is_pointer_down(id) {
            return;
        }
        if let Some(motion) = self.pointers.get_mut(id as usize) {
            *motion = PointerMotion::default();
        }
        self.pointers_down &= !(1 << id);
    }

    pub fn is_pointer_down(&self, id: PointerId) -> bool {
        id < MAX_TRACKED_POINTERS && self.pointers_down & (1 << id) != 0
    }

    /// Ids of all pointers currently down, lowest first.
    pub fn tracked_ids(&self) -> impl Iterator<Item = PointerId> + '_ {
        (0..MAX_TRACKED_POINTERS).filter(move |id| self.is_pointer_down(*id))
    }

    pub fn initial_position(&self, id: PointerId) -> Option<Point> {
        self.motion(id).map(|m| m.initial)
    }

    pub fn last_position(&self, id: PointerId) -> Option<Point> {
        self.motion(id).map(|m| m.last)
    }

    pub fn edges_touched(&self, id: PointerId) -> EdgeFlags {
        self.motion(id).map(|m| m.edges_touched).unwrap_or_default()
    }

    pub fn edge_drags_in_progress(&self, id: PointerId) -> EdgeFlags {
        self.motion(id)
            .map(|m| m.edge_drags_in_progress)
            .unwrap_or_default()
    }

    pub fn mark_edge_drag(&mut self, id: PointerId, edge: EdgeFlags) {
        if let Some(motion) = self.motion_mut(id) {
            motion.edge_drags_in_progress |= edge;
        }
    }

    pub fn edges_locked(&self, id: PointerId) -> EdgeFlags {
        self.motion(id).map(|m| m.edges_locked).unwrap_or_default()
    }

    pub fn lock_edge(&mut self, id: PointerId, edge: EdgeFlags) {
        if let Some(motion) = self.motion_mut(id) {
            motion.edges_locked |= edge;
        }
    }

    /// Whether any tracked pointer has moved past `slop` along `directions`.
    pub fn check_touch_slop(&self, directions: Directions, slop: i32) -> bool {
        self.tracked_ids()
            .any(|id| self.check_touch_slop_for(directions, id, slop))
    }

    /// Whether pointer `id` has moved past `slop` along `directions`. With
    /// both axes the Euclidean distance is compared.
    pub fn check_touch_slop_for(&self, directions: Directions, id: PointerId, slop: i32) -> bool {
        let Some(motion) = self.motion(id) else {
            return false;
        };
        let delta = motion.last - motion.initial;
        let slop = slop as f32;
        match (directions.horizontal(), directions.vertical()) {
            (true, true) => delta.x * delta.x + delta.y * delta.y > slop * slop,
            (true, false) => delta.x.abs() > slop,
            (false, true) => delta.y.abs() > slop,
            (false, false) => false,
        }
    }

    /// Whether any tracked pointer started near one of `edges`.
    pub fn is_edge_touched(&self, edges: EdgeFlags) -> bool {
        self.tracked_ids().any(|id| self.is_edge_touched_by(edges, id))
    }

    pub fn is_edge_touched_by(&self, edges: EdgeFlags, id: PointerId) -> bool {
        self.motion(id)
            .is_some_and(|m| m.edges_touched.intersects(edges))
    }

    fn edges_near(&self, position: Point, container: IntRect) -> EdgeFlags {
        let band = self.edge_size as f32;
        let mut edges = EdgeFlags::NONE;
        if position.x < container.left as f32 + band {
            edges |= EdgeFlags::LEFT;
        }
        if position.y < container.top as f32 + band {
            edges |= EdgeFlags::TOP;
        }
        if position.x > container.right as f32 - band {
            edges |= EdgeFlags::RIGHT;
        }
        if position.y > container.bottom as f32 - band {
            edges |= EdgeFlags::BOTTOM;
        }
        edges
    }

    fn motion(&self, id: PointerId) -> Option<&PointerMotion> {
        if !self.is_pointer_down(id) {
            return None;
        }
        self.pointers.get(id as usize)
    }

    fn motion_mut(&mut self, id: PointerId) -> Option<&mut PointerMotion> {
        if !self.is_pointer_down(id) {
            return None;
        }
        self.pointers.get_mut(id as usize)
    }

    fn slot_mut(&mut self, id: PointerId) -> Option<&mut PointerMotion> {
        if id >= MAX_TRACKED_POINTERS {
            return None;
        }
        let index = id as usize;
        if self.pointers.len() <= index {
            self.pointers.resize(index + 1, PointerMotion::default());
        }
        self.pointers.get_mut(index)
    }
}

/// Zero below `min` in magnitude, `±max` above it, unchanged otherwise.
fn zero_below(value: f32, min: f32) -> f32 {
    if value.abs() < min {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
#[path = "tests/motion_tracker_tests.rs"]
mod tests;

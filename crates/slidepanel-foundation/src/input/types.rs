use slidepanel_geometry::Point;
use smallvec::SmallVec;

/// Identifier of a pointer, stable for the lifetime of one touch.
///
/// Ids are small and dense (the first finger is `0`), so they double as
/// indices into per-pointer bookkeeping.
pub type PointerId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionAction {
    /// First pointer of a new gesture went down.
    Down,
    /// An additional pointer went down; see [`MotionEvent::action_index`].
    PointerDown,
    Move,
    /// A non-final pointer lifted; see [`MotionEvent::action_index`].
    PointerUp,
    /// Last pointer lifted, ending the gesture.
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: PointerId,
    pub position: Point,
}

impl PointerSample {
    pub fn new(id: PointerId, x: f32, y: f32) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// One batch of pointer samples delivered together.
///
/// Every event carries the positions of all pointers currently down, in
/// container coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    action: MotionAction,
    action_index: usize,
    uptime_ms: u64,
    pointers: SmallVec<[PointerSample; 4]>,
}

impl MotionEvent {
    pub fn new(
        action: MotionAction,
        action_index: usize,
        uptime_ms: u64,
        pointers: impl IntoIterator<Item = PointerSample>,
    ) -> Self {
        Self {
            action,
            action_index,
            uptime_ms,
            pointers: pointers.into_iter().collect(),
        }
    }

    /// Single-pointer event.
    pub fn single(action: MotionAction, id: PointerId, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(action, 0, uptime_ms, [PointerSample::new(id, x, y)])
    }

    pub fn down(id: PointerId, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::single(MotionAction::Down, id, x, y, uptime_ms)
    }

    pub fn moved(id: PointerId, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::single(MotionAction::Move, id, x, y, uptime_ms)
    }

    pub fn up(id: PointerId, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::single(MotionAction::Up, id, x, y, uptime_ms)
    }

    pub fn cancel(id: PointerId, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::single(MotionAction::Cancel, id, x, y, uptime_ms)
    }

    pub fn action(&self) -> MotionAction {
        self.action
    }

    /// Index of the pointer that went down or up for `PointerDown` /
    /// `PointerUp`; `0` otherwise.
    pub fn action_index(&self) -> usize {
        self.action_index
    }

    pub fn uptime_ms(&self) -> u64 {
        self.uptime_ms
    }

    pub fn pointers(&self) -> &[PointerSample] {
        &self.pointers
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer(&self, index: usize) -> Option<PointerSample> {
        self.pointers.get(index).copied()
    }

    /// The pointer this action is about.
    pub fn action_pointer(&self) -> Option<PointerSample> {
        self.pointer(self.action_index)
    }

    pub fn find_pointer_index(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|p| p.id == id)
    }

    /// Position of the first pointer, or the origin for an empty batch.
    pub fn position(&self) -> Point {
        self.pointers
            .first()
            .map(|p| p.position)
            .unwrap_or(Point::ZERO)
    }

    pub fn x(&self) -> f32 {
        self.position().x
    }

    pub fn y(&self) -> f32 {
        self.position().y
    }

    /// Copy of this event with a different action, used to synthesize a
    /// well-formed stream when ownership changes hands mid-gesture.
    pub fn with_action(&self, action: MotionAction) -> Self {
        Self {
            action,
            action_index: 0,
            uptime_ms: self.uptime_ms,
            pointers: self.pointers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_pointer_follows_index() {
        let event = MotionEvent::new(
            MotionAction::PointerDown,
            1,
            10,
            [PointerSample::new(0, 1.0, 2.0), PointerSample::new(3, 5.0, 6.0)],
        );
        assert_eq!(event.action_pointer().map(|p| p.id), Some(3));
        assert_eq!(event.find_pointer_index(3), Some(1));
        assert_eq!(event.find_pointer_index(7), None);
    }

    #[test]
    fn with_action_keeps_positions() {
        let event = MotionEvent::moved(0, 4.0, 9.0, 20);
        let down = event.with_action(MotionAction::Down);
        assert_eq!(down.action(), MotionAction::Down);
        assert_eq!(down.position(), Point::new(4.0, 9.0));
        assert_eq!(down.uptime_ms(), 20);
    }
}

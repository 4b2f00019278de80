//! Scroll-position probes for the nested scrollable child.
//!
//! A probe answers one question: how far is the child from the edge the
//! panel collapses toward? While the answer is positive the child can still
//! scroll in the collapsing direction and keeps the touch stream; at zero or
//! below the panel may take over.

use std::cell::Cell;
use std::rc::Rc;

pub trait ScrollPositionProbe {
    /// Remaining scroll distance toward the collapsed edge. `sliding_up`
    /// tells which end of the content that is: the top when the panel slides
    /// up, the bottom when it slides down.
    fn scroll_position(&self, sliding_up: bool) -> i32;
}

impl<F> ScrollPositionProbe for F
where
    F: Fn(bool) -> i32,
{
    fn scroll_position(&self, sliding_up: bool) -> i32 {
        self(sliding_up)
    }
}

/// Live probe over metrics the host keeps updating.
impl<P> ScrollPositionProbe for Cell<P>
where
    P: ScrollPositionProbe + Copy,
{
    fn scroll_position(&self, sliding_up: bool) -> i32 {
        self.get().scroll_position(sliding_up)
    }
}

impl<P> ScrollPositionProbe for Rc<P>
where
    P: ScrollPositionProbe + ?Sized,
{
    fn scroll_position(&self, sliding_up: bool) -> i32 {
        (**self).scroll_position(sliding_up)
    }
}

/// A plain scroll container: one child scrolled by `scroll_y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScrollViewMetrics {
    pub scroll_y: i32,
    pub viewport_height: i32,
    /// Bottom edge of the scrolled child in content coordinates.
    pub content_bottom: i32,
}

impl ScrollPositionProbe for ScrollViewMetrics {
    fn scroll_position(&self, sliding_up: bool) -> i32 {
        if sliding_up {
            self.scroll_y
        } else {
            self.content_bottom - (self.viewport_height + self.scroll_y)
        }
    }
}

/// A recycling list, where only the visible rows are measured. The scroll
/// position is approximated from the first or last visible row assuming
/// uniform row heights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ListMetrics {
    pub item_count: usize,
    /// Rows currently laid out; `0` means the list is empty or not laid out.
    pub child_count: usize,
    pub first_visible_position: usize,
    pub first_child_top: i32,
    pub first_child_height: i32,
    pub last_visible_position: usize,
    pub last_child_bottom: i32,
    pub last_child_height: i32,
    /// Bottom edge of the list itself, in the same space as the rows.
    pub list_bottom: i32,
}

impl ScrollPositionProbe for ListMetrics {
    fn scroll_position(&self, sliding_up: bool) -> i32 {
        if self.child_count == 0 || self.item_count == 0 {
            return 0;
        }
        if sliding_up {
            self.first_visible_position as i32 * self.first_child_height - self.first_child_top
        } else {
            let rows_below =
                self.item_count as i32 - self.last_visible_position as i32 - 1;
            rows_below * self.last_child_height + self.last_child_bottom - self.list_bottom
        }
    }
}

//! Slide and state listeners.
//!
//! Listeners are dispatched from a snapshot of the registry, so a listener
//! may add or remove listeners (itself included) through the
//! [`PanelController`] it receives without disturbing the dispatch in
//! progress.

use std::rc::Rc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::controller::PanelController;
use crate::state::PanelState;

pub trait PanelSlideListener {
    /// The panel moved; `slide_offset` is `0` when collapsed and the max
    /// slide offset when expanded.
    fn on_panel_slide(&self, _panel: &PanelController, _slide_offset: f32) {}

    fn on_panel_state_changed(
        &self,
        _panel: &PanelController,
        _previous: PanelState,
        _new: PanelState,
    ) {
    }
}

/// Invoked for a tap on the uncovered main content while the panel is open.
pub type FadeClickListener = Rc<dyn Fn(&PanelController)>;

/// Handle returned when registering a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub(crate) type ListenerSnapshot = SmallVec<[Rc<dyn PanelSlideListener>; 4]>;

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: IndexMap<ListenerId, Rc<dyn PanelSlideListener>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, listener: Rc<dyn PanelSlideListener>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, listener);
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.shift_remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Listeners in registration order.
    pub(crate) fn snapshot(&self) -> ListenerSnapshot {
        self.listeners.values().cloned().collect()
    }
}

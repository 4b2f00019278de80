//! Re-entrant command handle for listeners.
//!
//! Listener callbacks run while the panel is in the middle of an operation,
//! so they cannot borrow it. They get a [`PanelController`] instead: state
//! requests are queued and applied by the panel once the current operation
//! returns, in the order they were made.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::error::PanelError;
use crate::listeners::{ListenerId, ListenerRegistry, PanelSlideListener};
use crate::state::PanelState;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelCommand {
    SetPanelState(PanelState),
    SetAnchorPoint(f32),
    SetTouchEnabled(bool),
    SetEnabled(bool),
    SmoothSlideTo(f32),
}

#[derive(Clone)]
pub struct PanelController {
    commands: Rc<RefCell<VecDeque<PanelCommand>>>,
    listeners: Rc<RefCell<ListenerRegistry>>,
}

impl PanelController {
    pub(crate) fn new(listeners: Rc<RefCell<ListenerRegistry>>) -> Self {
        Self {
            commands: Rc::default(),
            listeners,
        }
    }

    /// Queues a state change. `Dragging` is rejected right away.
    pub fn set_panel_state(&self, state: PanelState) -> Result<(), PanelError> {
        if state == PanelState::Dragging {
            return Err(PanelError::DraggingNotSettable);
        }
        self.push(PanelCommand::SetPanelState(state));
        Ok(())
    }

    pub fn set_anchor_point(&self, anchor_point: f32) {
        self.push(PanelCommand::SetAnchorPoint(anchor_point));
    }

    pub fn set_touch_enabled(&self, enabled: bool) {
        self.push(PanelCommand::SetTouchEnabled(enabled));
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.push(PanelCommand::SetEnabled(enabled));
    }

    pub fn smooth_slide_to(&self, slide_offset: f32) {
        self.push(PanelCommand::SmoothSlideTo(slide_offset));
    }

    /// Takes effect immediately; the listener receives events from the next
    /// dispatch on.
    pub fn add_panel_slide_listener(&self, listener: Rc<dyn PanelSlideListener>) -> ListenerId {
        self.listeners.borrow_mut().add(listener)
    }

    /// Takes effect immediately; a dispatch already in progress still
    /// reaches the removed listener.
    pub fn remove_panel_slide_listener(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().remove(id)
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.borrow().len()
    }

    pub(crate) fn next_command(&self) -> Option<PanelCommand> {
        self.commands.borrow_mut().pop_front()
    }

    fn push(&self, command: PanelCommand) {
        log::trace!("queued {command:?}");
        self.commands.borrow_mut().push_back(command);
    }
}

impl std::fmt::Debug for PanelController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelController")
            .field("pending_commands", &self.pending_commands())
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

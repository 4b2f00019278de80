//! Persisted panel state carried alongside the host's own state.

use crate::config::SLIDING_STATE_KEY;
use crate::error::PanelError;
use crate::state::PanelState;

/// The host's opaque state plus the panel's last rest state. Never holds
/// [`PanelState::Dragging`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedState<T> {
    pub host: T,
    pub sliding_state: PanelState,
}

impl<T> SavedState<T> {
    /// Key/value form for string-keyed state bundles.
    pub fn entry(&self) -> (&'static str, &'static str) {
        (SLIDING_STATE_KEY, self.sliding_state.as_str())
    }

    /// Rebuilds the saved state from bundle entries, ignoring unrelated keys.
    pub fn from_entries<K, V, I>(host: T, entries: I) -> Result<Self, PanelError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let value = entries
            .into_iter()
            .find(|(key, _)| key.as_ref() == SLIDING_STATE_KEY)
            .ok_or(PanelError::MissingSavedState)?
            .1;
        let sliding_state: PanelState = value.as_ref().parse()?;
        if sliding_state == PanelState::Dragging {
            return Err(PanelError::DraggingNotSettable);
        }
        Ok(Self {
            host,
            sliding_state,
        })
    }

    pub fn map_host<U>(self, f: impl FnOnce(T) -> U) -> SavedState<U> {
        SavedState {
            host: f(self.host),
            sliding_state: self.sliding_state,
        }
    }
}

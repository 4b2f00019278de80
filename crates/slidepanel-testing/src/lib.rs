//! Testing utilities and harness for the sliding panel core

pub mod recording;
pub mod rule;

pub use recording::{HostRecord, RecordingHost, RecordingListener};
pub use rule::PanelTestRule;

pub mod prelude {
    pub use crate::recording::{HostRecord, RecordingHost, RecordingListener};
    pub use crate::rule::*;
}

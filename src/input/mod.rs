//! Input handling: key event types and the modal state machine.

mod keys;
mod machine;

pub use keys::{convert_event, Event, Key, KeyCode, KeyModifiers};
pub use machine::{CommandLine, InputOutcome, InputStateMachine, Mode};

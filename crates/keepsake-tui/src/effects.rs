//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer only mutates state and returns effects, never performs I/O.

use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Best-effort haptic pulse: ring the bell and flash the frame for `duration`.
    Haptic { duration: Duration },
}

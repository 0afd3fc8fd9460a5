//! UI event types.
//!
//! All external inputs (terminal, clock, async results) are converted to
//! `UiEvent` before being processed by the reducer.

use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Render cadence tick.
    Tick,

    /// Emitted first on every loop iteration with the terminal size and the
    /// time elapsed since the presentation started.
    Frame {
        width: u16,
        height: u16,
        now: Duration,
    },

    /// Raw terminal input.
    Terminal(CrosstermEvent),

    /// A haptic pulse finished.
    HapticDone,
}

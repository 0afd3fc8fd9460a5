//! Application state for the presentation TUI.
//!
//! ```text
//! AppState
//! ├── session: Session     (page sequence, live page, ambient state)
//! ├── haptics: bool        (haptic effects enabled)
//! ├── pulses: usize        (haptic pulses still flashing)
//! ├── frame: u64           (tick counter for the typing caret)
//! ├── size: (u16, u16)     (terminal size from the last Frame event)
//! └── should_quit: bool
//! ```

use keepsake_core::session::Session;

pub struct AppState {
    /// The engine. All sequencing lives here.
    pub session: Session,
    /// Whether haptic pulses turn into effects.
    pub haptics: bool,
    /// Number of haptic pulses currently flashing the frame.
    pub pulses: usize,
    /// Tick counter, drives the caret blink.
    pub frame: u64,
    /// Terminal width and height, set from `UiEvent::Frame`.
    pub size: (u16, u16),
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// The final letter has typed its last paragraph.
    pub finished: bool,
}

impl AppState {
    pub fn new(session: Session, haptics: bool) -> Self {
        Self {
            session,
            haptics,
            pulses: 0,
            frame: 0,
            size: (0, 0),
            should_quit: false,
            finished: false,
        }
    }

    /// True while at least one haptic pulse is active.
    pub fn is_flashing(&self) -> bool {
        self.pulses > 0
    }

    /// Whether the runtime should tick at full frame rate.
    pub fn needs_fast_poll(&self) -> bool {
        self.is_flashing() || self.session.page().pending_timers() > 0
    }
}

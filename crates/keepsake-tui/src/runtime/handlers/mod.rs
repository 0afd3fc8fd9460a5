//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return `UiEvent`. The runtime spawns
//! them with `spawn_effect` and the result lands in the inbox.

use std::time::Duration;

use crate::events::UiEvent;

/// Holds a haptic pulse for its duration, then reports it done.
pub async fn haptic_pulse(duration: Duration) -> UiEvent {
    tokio::time::sleep(duration).await;
    UiEvent::HapticDone
}

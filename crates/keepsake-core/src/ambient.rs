//! Ambient modulator: pointer position and idle detection.
//!
//! Purely cosmetic. The session reads `depth` and `calmness` to tint the
//! presentation; nothing here influences page sequencing.

use std::time::Duration;

use tracing::debug;

use crate::sequence::PageId;
use crate::timer::{TimerHandle, TimerQueue};

/// Calmness while the pointer is resting.
const IDLE_CALMNESS: f32 = 0.3;

#[derive(Debug)]
pub struct Ambient {
    pointer: Option<(u16, u16)>,
    idle: bool,
    idle_after: Duration,
    timers: TimerQueue<()>,
    pending_idle: Option<TimerHandle>,
}

impl Ambient {
    pub fn new(idle_after: Duration) -> Self {
        Self {
            pointer: None,
            idle: false,
            idle_after,
            timers: TimerQueue::new(),
            pending_idle: None,
        }
    }

    /// Records a pointer move and restarts the quiet window.
    ///
    /// Returns true if this move ended an idle period.
    pub fn pointer_moved(&mut self, now: Duration, x: u16, y: u16) -> bool {
        self.pointer = Some((x, y));
        let was_idle = std::mem::replace(&mut self.idle, false);
        if let Some(handle) = self.pending_idle.take() {
            self.timers.cancel(handle);
        }
        self.pending_idle = Some(self.timers.schedule(now, self.idle_after, ()));
        was_idle
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Fires the idle timer if it is due. Returns true if the flag flipped to idle.
    pub fn fire_due(&mut self, now: Duration) -> bool {
        let Some((at, ())) = self.timers.pop_due(now) else {
            return false;
        };
        self.pending_idle = None;
        debug!(at_ms = at.as_millis() as u64, "pointer idle");
        !std::mem::replace(&mut self.idle, true)
    }

    /// Last pointer position, once the pointer has moved.
    pub fn pointer(&self) -> Option<(u16, u16)> {
        self.pointer
    }

    pub fn idle(&self) -> bool {
        self.idle
    }

    /// How far into the presentation a page is, from 0.0 to 1.0.
    pub fn depth(index: usize) -> f32 {
        index.min(PageId::LAST_INDEX) as f32 / PageId::LAST_INDEX as f32
    }

    /// Visual intensity: 0.0 on the final page, dimmed while idle, 1.0 otherwise.
    pub fn calmness(&self, index: usize) -> f32 {
        if index >= PageId::LAST_INDEX {
            0.0
        } else if self.idle {
            IDLE_CALMNESS
        } else {
            1.0
        }
    }
}

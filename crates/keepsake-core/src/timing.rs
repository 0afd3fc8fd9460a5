//! Timing constants for every page, overridable from the `[timing]` config table.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delays in milliseconds plus a global `speed` divisor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Divides every delay. 2.0 plays twice as fast.
    pub speed: f64,
    /// Pause between the welcome lines.
    pub welcome_step_ms: u64,
    /// Pause after the last welcome line before the button shows.
    pub welcome_button_ms: u64,
    /// Pause before a button shows on the static pages.
    pub button_delay_ms: u64,
    /// Taps needed on the heart.
    pub heart_threshold: u32,
    /// Pause between the final tap and the heart reveal line.
    pub heart_reveal_ms: u64,
    /// Pause between the final tap and leaving the heart page.
    pub heart_advance_ms: u64,
    /// Pause between gratitude lines.
    pub gratitude_step_ms: u64,
    /// Drag distance between tick pulses.
    pub drag_tick_step: u8,
    /// Pause between reaching the end of the slider and leaving the page.
    pub drag_advance_ms: u64,
    /// Pause between confession lines.
    pub confession_step_ms: u64,
    /// Pause after the last confession line before leaving the page.
    pub confession_advance_ms: u64,
    /// Per-character delay in the final letter.
    pub typewriter_interval_ms: u64,
    /// Pause after a letter paragraph before the next one starts.
    pub typewriter_pause_ms: u64,
    /// Quiet time before the pointer counts as idle.
    pub idle_after_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            speed: 1.0,
            welcome_step_ms: 1800,
            welcome_button_ms: 1000,
            button_delay_ms: 1200,
            heart_threshold: 6,
            heart_reveal_ms: 500,
            heart_advance_ms: 3500,
            gratitude_step_ms: 3200,
            drag_tick_step: 8,
            drag_advance_ms: 2200,
            confession_step_ms: 2800,
            confession_advance_ms: 6500,
            typewriter_interval_ms: 45,
            typewriter_pause_ms: 800,
            idle_after_ms: 4000,
        }
    }
}

impl Timing {
    /// Returns a copy with `speed` replaced. Non-positive or non-finite values reset to 1.0.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    fn effective_speed(&self) -> f64 {
        if self.speed.is_finite() && self.speed > 0.0 {
            self.speed
        } else {
            1.0
        }
    }

    fn scaled(&self, ms: u64) -> Duration {
        let nanos = (ms as f64 * 1_000_000.0 / self.effective_speed()).round();
        Duration::from_nanos(nanos as u64)
    }

    pub fn welcome_step(&self) -> Duration {
        self.scaled(self.welcome_step_ms)
    }

    pub fn welcome_button(&self) -> Duration {
        self.scaled(self.welcome_button_ms)
    }

    pub fn button_delay(&self) -> Duration {
        self.scaled(self.button_delay_ms)
    }

    pub fn heart_reveal(&self) -> Duration {
        self.scaled(self.heart_reveal_ms)
    }

    pub fn heart_advance(&self) -> Duration {
        self.scaled(self.heart_advance_ms)
    }

    pub fn gratitude_step(&self) -> Duration {
        self.scaled(self.gratitude_step_ms)
    }

    pub fn drag_advance(&self) -> Duration {
        self.scaled(self.drag_advance_ms)
    }

    pub fn confession_step(&self) -> Duration {
        self.scaled(self.confession_step_ms)
    }

    pub fn confession_advance(&self) -> Duration {
        self.scaled(self.confession_advance_ms)
    }

    pub fn typewriter_interval(&self) -> Duration {
        self.scaled(self.typewriter_interval_ms)
    }

    pub fn typewriter_pause(&self) -> Duration {
        self.scaled(self.typewriter_pause_ms)
    }

    pub fn idle_after(&self) -> Duration {
        self.scaled(self.idle_after_ms)
    }
}

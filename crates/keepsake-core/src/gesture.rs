//! Gesture counters: discrete taps and a continuous drag value.
//!
//! Both report their threshold crossing through a `Latch`, so repeated input
//! past the threshold never repeats the crossing.

use std::time::Duration;

use crate::latch::Latch;

/// Result of a single tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapOutcome {
    /// Total taps so far, including this one.
    pub count: u32,
    /// Haptic pulse length requested for this tap.
    pub haptic: Duration,
    /// True only for the tap that reached the threshold.
    pub crossed: bool,
}

#[derive(Debug, Clone)]
pub struct TapCounter {
    count: u32,
    threshold: u32,
    crossed: Latch,
}

impl TapCounter {
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold,
            crossed: Latch::new(),
        }
    }

    pub fn tap(&mut self) -> TapOutcome {
        // Pulses grow with every tap: 10ms, 12ms, 14ms, ...
        let haptic = Duration::from_millis(10 + u64::from(self.count) * 2);
        self.count = self.count.saturating_add(1);
        let crossed = self.count >= self.threshold && self.crossed.trigger();
        TapOutcome {
            count: self.count,
            haptic,
            crossed,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn has_crossed(&self) -> bool {
        self.crossed.is_triggered()
    }
}

/// Result of setting the drag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragOutcome {
    /// The clamped value that was applied.
    pub progress: u8,
    /// Moved at least one step since the last tick.
    pub tick: bool,
    /// Reached 100 for the first time.
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct DragProgress {
    progress: u8,
    last_tick: u8,
    step: u8,
    completed: Latch,
}

impl DragProgress {
    pub const MAX: u8 = 100;

    pub fn new(step: u8) -> Self {
        Self {
            progress: 0,
            last_tick: 0,
            step: step.max(1),
            completed: Latch::new(),
        }
    }

    /// Sets the value directly, clamped into `0..=100`.
    pub fn set(&mut self, value: i32) -> DragOutcome {
        let progress = value.clamp(0, i32::from(Self::MAX)) as u8;
        self.progress = progress;

        let tick = progress.abs_diff(self.last_tick) >= self.step;
        if tick {
            self.last_tick = progress;
        }
        let completed = progress >= Self::MAX && self.completed.trigger();

        DragOutcome {
            progress,
            tick,
            completed,
        }
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.completed.is_triggered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_crosses_threshold_exactly_once() {
        let mut taps = TapCounter::new(6);
        let crossings: Vec<u32> = (0..20)
            .map(|_| taps.tap())
            .filter(|o| o.crossed)
            .map(|o| o.count)
            .collect();
        assert_eq!(crossings, vec![6]);
        assert_eq!(taps.count(), 20);
        assert!(taps.has_crossed());
    }

    #[test]
    fn test_tap_haptic_grows() {
        let mut taps = TapCounter::new(6);
        assert_eq!(taps.tap().haptic, Duration::from_millis(10));
        assert_eq!(taps.tap().haptic, Duration::from_millis(12));
        assert_eq!(taps.tap().haptic, Duration::from_millis(14));
    }

    #[test]
    fn test_drag_ticks_every_step() {
        let mut drag = DragProgress::new(8);
        assert!(!drag.set(5).tick);
        assert!(drag.set(8).tick);
        assert!(!drag.set(15).tick);
        assert!(drag.set(16).tick);
        // Moving back also counts as movement.
        assert!(drag.set(4).tick);
    }

    #[test]
    fn test_drag_jump_to_max_completes_once() {
        let mut drag = DragProgress::new(8);
        let first = drag.set(100);
        assert!(first.completed);
        assert!(first.tick);
        assert!(!drag.set(100).completed);
        assert!(!drag.set(90).completed);
        assert!(!drag.set(100).completed);
        assert!(drag.is_completed());
    }

    #[test]
    fn test_drag_clamps_input() {
        let mut drag = DragProgress::new(8);
        assert_eq!(drag.set(-20).progress, 0);
        let over = drag.set(250);
        assert_eq!(over.progress, 100);
        assert!(over.completed);
    }
}

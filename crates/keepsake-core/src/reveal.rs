//! Staged reveal: a monotonic step counter shared by every page.
//!
//! A page splits its content into `stages` chunks (lines, words, paragraphs).
//! Timed reveals step on their own interval; the others are stepped by the
//! owning page (a tap, the slider, a finished paragraph). The step never
//! decreases and never exceeds `stages`.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct StagedReveal {
    stages: usize,
    step: usize,
    interval: Option<Duration>,
}

impl StagedReveal {
    /// A reveal stepped by its page.
    pub fn new(stages: usize) -> Self {
        Self {
            stages,
            step: 0,
            interval: None,
        }
    }

    /// A reveal that shows one stage per `interval`.
    pub fn timed(stages: usize, interval: Duration) -> Self {
        Self {
            interval: Some(interval),
            ..Self::new(stages)
        }
    }

    /// Reveals one more stage. Returns false when everything is already shown.
    pub fn advance(&mut self) -> bool {
        if self.step < self.stages {
            self.step += 1;
            true
        } else {
            false
        }
    }

    /// Moves forward to `floor(fraction × stages)`; never moves back.
    ///
    /// Returns true if the step changed.
    pub fn reveal_fraction(&mut self, fraction: f64) -> bool {
        let fraction = fraction.clamp(0.0, 1.0);
        let target = ((fraction * self.stages as f64).floor() as usize).min(self.stages);
        if target > self.step {
            self.step = target;
            true
        } else {
            false
        }
    }

    /// Delay until the next timed stage, if this reveal is timed and unfinished.
    pub fn next_delay(&self) -> Option<Duration> {
        self.interval.filter(|_| !self.is_complete())
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.step >= self.stages
    }
}

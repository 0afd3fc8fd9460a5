//! Typewriter producer.
//!
//! Reveals a text one grapheme per tick. The owner schedules each tick using
//! the delay returned by the previous step, so the producer itself never
//! touches a clock.
//!
//! ```text
//! start() -> Wait(interval)
//! tick()  -> Wait(interval)   (graphemes 1..L-1)
//! tick()  -> Wait(pause)      (grapheme L, text fully shown)
//! tick()  -> Complete         (exactly once)
//! tick()  -> Idle
//! ```

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::latch::Latch;

/// What the owner should do after calling `start` or `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterStep {
    /// Call `tick` again after this delay.
    Wait(Duration),
    /// The text is fully shown and the closing pause elapsed.
    Complete,
    /// Nothing left to do.
    Idle,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    /// Byte offset of the end of each grapheme.
    ends: Vec<usize>,
    revealed: usize,
    interval: Duration,
    pause: Duration,
    started: bool,
    completed: Latch,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, interval: Duration, pause: Duration) -> Self {
        let text = text.into();
        let ends = text
            .grapheme_indices(true)
            .map(|(start, g)| start + g.len())
            .collect();
        Self {
            text,
            ends,
            revealed: 0,
            interval,
            pause,
            started: false,
            completed: Latch::new(),
        }
    }

    /// Starts the producer. Only the first call does anything.
    pub fn start(&mut self) -> TypewriterStep {
        if std::mem::replace(&mut self.started, true) {
            return TypewriterStep::Idle;
        }
        if self.ends.is_empty() {
            self.completed.trigger();
            return TypewriterStep::Complete;
        }
        TypewriterStep::Wait(self.interval)
    }

    /// Reveals the next grapheme, or completes once everything is shown.
    pub fn tick(&mut self) -> TypewriterStep {
        if !self.started || self.completed.is_triggered() {
            return TypewriterStep::Idle;
        }
        if self.revealed < self.ends.len() {
            self.revealed += 1;
            return if self.revealed < self.ends.len() {
                TypewriterStep::Wait(self.interval)
            } else {
                TypewriterStep::Wait(self.pause)
            };
        }
        if self.completed.trigger() {
            TypewriterStep::Complete
        } else {
            TypewriterStep::Idle
        }
    }

    /// The currently revealed prefix.
    pub fn visible(&self) -> &str {
        match self.revealed {
            0 => "",
            n => &self.text[..self.ends[n - 1]],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Length in graphemes.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.revealed == self.ends.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed.is_triggered()
    }

    /// Every prefix the producer will show, shortest first.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.ends.iter().map(|&end| &self.text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(45);
    const PAUSE: Duration = Duration::from_millis(800);

    fn writer(text: &str) -> Typewriter {
        Typewriter::new(text, INTERVAL, PAUSE)
    }

    #[test]
    fn test_reveals_one_grapheme_per_tick_then_completes_once() {
        let mut tw = writer("hey");
        assert_eq!(tw.start(), TypewriterStep::Wait(INTERVAL));
        assert_eq!(tw.visible(), "");

        assert_eq!(tw.tick(), TypewriterStep::Wait(INTERVAL));
        assert_eq!(tw.visible(), "h");
        assert_eq!(tw.tick(), TypewriterStep::Wait(INTERVAL));
        assert_eq!(tw.visible(), "he");
        assert_eq!(tw.tick(), TypewriterStep::Wait(PAUSE));
        assert_eq!(tw.visible(), "hey");
        assert!(tw.is_fully_revealed());
        assert!(!tw.is_complete());

        assert_eq!(tw.tick(), TypewriterStep::Complete);
        assert_eq!(tw.tick(), TypewriterStep::Idle);
        assert_eq!(tw.tick(), TypewriterStep::Idle);
        assert!(tw.is_complete());
    }

    #[test]
    fn test_revealed_after_k_ticks_is_min_k_len() {
        let text = "I married your smile";
        let len = text.len();
        let mut tw = writer(text);
        tw.start();
        let mut completions = 0;
        for k in 1..=len + 5 {
            if tw.tick() == TypewriterStep::Complete {
                completions += 1;
                assert_eq!(k, len + 1, "completion comes right after the last reveal");
            }
            assert_eq!(tw.revealed(), k.min(len));
        }
        assert_eq!(completions, 1);
    }

    #[test]
    fn test_empty_text_completes_immediately() {
        let mut tw = writer("");
        assert_eq!(tw.start(), TypewriterStep::Complete);
        assert_eq!(tw.tick(), TypewriterStep::Idle);
        assert_eq!(tw.start(), TypewriterStep::Idle);
        assert!(tw.is_complete());
        assert_eq!(tw.visible(), "");
    }

    #[test]
    fn test_not_restartable() {
        let mut tw = writer("ab");
        tw.start();
        tw.tick();
        assert_eq!(tw.start(), TypewriterStep::Idle);
        assert_eq!(tw.visible(), "a");
    }

    #[test]
    fn test_tick_before_start_is_idle() {
        let mut tw = writer("ab");
        assert_eq!(tw.tick(), TypewriterStep::Idle);
        assert_eq!(tw.revealed(), 0);
    }

    #[test]
    fn test_emoji_are_never_split() {
        let mut tw = writer("a❤️🧎🏻");
        assert_eq!(tw.len(), 3);
        tw.start();
        tw.tick();
        tw.tick();
        assert_eq!(tw.visible(), "a❤️");
        let prefixes: Vec<_> = tw.prefixes().collect();
        assert_eq!(prefixes, vec!["a", "a❤️", "a❤️🧎🏻"]);
    }
}

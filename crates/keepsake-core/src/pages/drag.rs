use std::time::Duration;

use tracing::info;

use crate::gesture::DragProgress;
use crate::latch::Latch;
use crate::pages::{
    Block, DRAG_DONE_HAPTIC, DRAG_TICK_HAPTIC, PageBehavior, PageInput, PageSignal, PageTimer,
    PageView, Tone,
};
use crate::reveal::StagedReveal;
use crate::script::DragText;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;

/// Slider from 0 to 100 that uncovers a sentence word by word.
#[derive(Debug)]
pub struct DragPage {
    prompt: String,
    hint: String,
    words: Vec<String>,
    drag: DragProgress,
    reveal: StagedReveal,
    advance: Latch,
    advance_delay: Duration,
    timers: TimerQueue<PageTimer>,
}

impl DragPage {
    pub fn new(text: &DragText, timing: &Timing) -> Self {
        let words: Vec<String> = text.sentence.split_whitespace().map(str::to_string).collect();
        Self {
            prompt: text.prompt.clone(),
            hint: text.hint.clone(),
            reveal: StagedReveal::new(words.len()),
            words,
            drag: DragProgress::new(timing.drag_tick_step),
            advance: Latch::new(),
            advance_delay: timing.drag_advance(),
            timers: TimerQueue::new(),
        }
    }
}

impl PageBehavior for DragPage {
    fn id(&self) -> PageId {
        PageId::DragReveal
    }

    fn mount(&mut self, _now: Duration) -> Vec<PageSignal> {
        vec![
            PageSignal::Revealed(self.prompt.clone()),
            PageSignal::Revealed(self.hint.clone()),
        ]
    }

    fn handle(&mut self, input: PageInput, now: Duration) -> Vec<PageSignal> {
        let PageInput::Progress(value) = input else {
            return Vec::new();
        };

        let outcome = self.drag.set(value);
        let mut signals = Vec::new();
        if outcome.tick {
            signals.push(PageSignal::Haptic(DRAG_TICK_HAPTIC));
        }
        // Word i shows once i < floor(progress × words): none at 0, all at 100.
        if self
            .reveal
            .reveal_fraction(f64::from(outcome.progress) / f64::from(DragProgress::MAX))
        {
            let shown = self.words[..self.reveal.step()].join(" ");
            signals.push(PageSignal::Revealed(shown));
        }
        if outcome.completed {
            info!("drag reached the end");
            signals.push(PageSignal::Haptic(DRAG_DONE_HAPTIC));
            self.timers
                .schedule(now, self.advance_delay, PageTimer::Advance);
        }
        signals
    }

    fn on_timer(&mut self, timer: PageTimer, _now: Duration) -> Vec<PageSignal> {
        match timer {
            PageTimer::Advance if self.advance.trigger() => vec![PageSignal::Advance],
            _ => Vec::new(),
        }
    }

    fn timers(&self) -> &TimerQueue<PageTimer> {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut TimerQueue<PageTimer> {
        &mut self.timers
    }

    fn view(&self) -> PageView {
        PageView {
            id: PageId::DragReveal,
            blocks: vec![
                Block::text(self.prompt.clone(), Tone::Primary),
                Block::text(self.hint.clone(), Tone::Whisper),
                Block::Words {
                    words: self.words.clone(),
                    revealed: self.reveal.step(),
                },
                Block::Slider {
                    progress: self.drag.progress(),
                },
            ],
            button: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pages::test_support::{Harness, ms};
    use crate::pages::{Block, DRAG_DONE_HAPTIC, DRAG_TICK_HAPTIC, PageInput, PageSignal};
    use crate::sequence::PageId;

    fn revealed_words(h: &Harness) -> usize {
        h.page
            .view()
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Words { revealed, .. } => Some(*revealed),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_words_follow_floor_of_progress() {
        // "Loving you has quietly taught me how to trust myself." has 10 words.
        let mut h = Harness::mount(PageId::DragReveal);
        h.input(PageInput::Progress(0));
        assert_eq!(revealed_words(&h), 0);
        h.input(PageInput::Progress(9));
        assert_eq!(revealed_words(&h), 0);
        h.input(PageInput::Progress(35));
        assert_eq!(revealed_words(&h), 3);
        h.input(PageInput::Progress(10));
        assert_eq!(revealed_words(&h), 3, "words never hide again");
        assert_eq!(
            h.reveals().last().unwrap().1,
            "Loving you has".to_string()
        );
    }

    #[test]
    fn test_jump_to_end_completes_once() {
        let mut h = Harness::mount(PageId::DragReveal);
        h.input(PageInput::Progress(100));
        h.input(PageInput::Progress(100));
        h.input(PageInput::Progress(60));
        h.input(PageInput::Progress(100));
        h.run_until(ms(10_000));

        assert_eq!(h.advances(), vec![ms(2200)]);
        let done = h
            .signals
            .iter()
            .filter(|(_, s)| *s == PageSignal::Haptic(DRAG_DONE_HAPTIC))
            .count();
        assert_eq!(done, 1);
        assert_eq!(revealed_words(&h), 10);
    }

    #[test]
    fn test_tick_haptic_every_eight_units() {
        let mut h = Harness::mount(PageId::DragReveal);
        for value in 1..=40 {
            h.input(PageInput::Progress(value));
        }
        let ticks = h
            .haptics()
            .into_iter()
            .filter(|d| *d == DRAG_TICK_HAPTIC)
            .count();
        assert_eq!(ticks, 5);
    }

    #[test]
    fn test_taps_ignored() {
        let mut h = Harness::mount(PageId::DragReveal);
        h.input(PageInput::Tap);
        h.input(PageInput::Activate);
        assert_eq!(h.page.pending_timers(), 0);
        assert!(h.haptics().is_empty());
    }
}

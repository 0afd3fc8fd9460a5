use std::time::Duration;

use tracing::info;

use crate::gesture::TapCounter;
use crate::latch::Latch;
use crate::pages::{Block, PageBehavior, PageInput, PageSignal, PageTimer, PageView, Tone};
use crate::reveal::StagedReveal;
use crate::script::HeartText;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;

/// Most taps the heart asks for, whatever the config says.
pub const MAX_TAPS: u32 = 64;

/// Tap the heart until the threshold; a line appears, then the page moves on.
#[derive(Debug)]
pub struct HeartPage {
    text: HeartText,
    taps: TapCounter,
    reveal: StagedReveal,
    advance: Latch,
    reveal_delay: Duration,
    advance_delay: Duration,
    timers: TimerQueue<PageTimer>,
}

impl HeartPage {
    pub fn new(text: &HeartText, timing: &Timing) -> Self {
        let threshold = timing.heart_threshold.clamp(1, MAX_TAPS);
        Self {
            text: text.clone(),
            taps: TapCounter::new(threshold),
            reveal: StagedReveal::new(1),
            advance: Latch::new(),
            reveal_delay: timing.heart_reveal(),
            advance_delay: timing.heart_advance(),
            timers: TimerQueue::new(),
        }
    }
}

impl PageBehavior for HeartPage {
    fn id(&self) -> PageId {
        PageId::Heart
    }

    fn mount(&mut self, _now: Duration) -> Vec<PageSignal> {
        vec![
            PageSignal::Revealed(self.text.prompt.clone()),
            PageSignal::Revealed(self.text.hint.clone()),
        ]
    }

    fn handle(&mut self, input: PageInput, now: Duration) -> Vec<PageSignal> {
        if matches!(input, PageInput::Progress(_)) {
            return Vec::new();
        }

        let outcome = self.taps.tap();
        if outcome.crossed {
            info!(taps = outcome.count, "heart threshold reached");
            self.timers
                .schedule(now, self.reveal_delay, PageTimer::RevealNext);
            self.timers
                .schedule(now, self.advance_delay, PageTimer::Advance);
        }
        vec![PageSignal::Haptic(outcome.haptic)]
    }

    fn on_timer(&mut self, timer: PageTimer, _now: Duration) -> Vec<PageSignal> {
        match timer {
            PageTimer::RevealNext if self.reveal.advance() => {
                vec![PageSignal::Revealed(self.text.reveal.clone())]
            }
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
        let mut blocks = vec![
            Block::text(self.text.prompt.clone(), Tone::Primary),
            Block::text(self.text.hint.clone(), Tone::Whisper),
            Block::Heart {
                taps: self.taps.count(),
                threshold: self.taps.threshold(),
            },
        ];
        if self.reveal.is_complete() {
            blocks.push(Block::text(self.text.reveal.clone(), Tone::Emphasis));
        }
        PageView {
            id: PageId::Heart,
            blocks,
            button: None,
        }
    }
}

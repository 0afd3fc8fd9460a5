use std::time::Duration;

use tracing::{debug, info};

use crate::latch::Latch;
use crate::pages::{Block, PageBehavior, PageInput, PageSignal, PageTimer, PageView, Tone};
use crate::reveal::StagedReveal;
use crate::script::LetterText;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;
use crate::typewriter::{Typewriter, TypewriterStep};

/// The terminal page: paragraphs typed out one after another.
///
/// `reveal.step()` counts the paragraphs that have started typing; each
/// completed paragraph starts the next one.
#[derive(Debug)]
pub struct LetterPage {
    heading: String,
    paragraphs: Vec<Typewriter>,
    reveal: StagedReveal,
    finished: Latch,
    timers: TimerQueue<PageTimer>,
}

impl LetterPage {
    pub fn new(text: &LetterText, timing: &Timing) -> Self {
        let interval = timing.typewriter_interval();
        let pause = timing.typewriter_pause();
        Self {
            heading: text.heading.clone(),
            paragraphs: text
                .paragraphs
                .iter()
                .map(|p| Typewriter::new(p.clone(), interval, pause))
                .collect(),
            reveal: StagedReveal::new(text.paragraphs.len()),
            finished: Latch::new(),
            timers: TimerQueue::new(),
        }
    }

    /// Starts the next paragraph, or reports the end of the letter.
    fn start_next(&mut self, now: Duration, signals: &mut Vec<PageSignal>) {
        if !self.reveal.advance() {
            if self.finished.trigger() {
                info!("letter finished");
                signals.push(PageSignal::Finished);
            }
            return;
        }
        let index = self.reveal.step() - 1;
        debug!(paragraph = index, "typing");
        let step = self.paragraphs[index].start();
        self.follow(step, now, signals);
    }

    fn follow(&mut self, step: TypewriterStep, now: Duration, signals: &mut Vec<PageSignal>) {
        match step {
            TypewriterStep::Wait(delay) => {
                self.timers.schedule(now, delay, PageTimer::Type);
            }
            TypewriterStep::Complete => {
                let text = self.paragraphs[self.reveal.step() - 1].text();
                if !text.is_empty() {
                    signals.push(PageSignal::Revealed(text.to_string()));
                }
                self.start_next(now, signals);
            }
            TypewriterStep::Idle => {}
        }
    }
}

impl PageBehavior for LetterPage {
    fn id(&self) -> PageId {
        PageId::FinalLetter
    }

    fn mount(&mut self, now: Duration) -> Vec<PageSignal> {
        let mut signals = vec![PageSignal::Revealed(self.heading.clone())];
        self.start_next(now, &mut signals);
        signals
    }

    fn handle(&mut self, _input: PageInput, _now: Duration) -> Vec<PageSignal> {
        Vec::new()
    }

    fn on_timer(&mut self, timer: PageTimer, now: Duration) -> Vec<PageSignal> {
        let mut signals = Vec::new();
        if timer == PageTimer::Type && self.reveal.step() > 0 {
            let step = self.paragraphs[self.reveal.step() - 1].tick();
            self.follow(step, now, &mut signals);
        }
        signals
    }

    fn timers(&self) -> &TimerQueue<PageTimer> {
        &self.timers
    }

    fn timers_mut(&mut self) -> &mut TimerQueue<PageTimer> {
        &mut self.timers
    }

    fn view(&self) -> PageView {
        let mut blocks = vec![Block::text(self.heading.clone(), Tone::Whisper)];
        for (i, paragraph) in self.paragraphs[..self.reveal.step()].iter().enumerate() {
            blocks.push(Block::Typed {
                text: paragraph.visible().to_string(),
                tone: if i == 0 { Tone::Title } else { Tone::Primary },
                typing: !paragraph.is_complete(),
            });
        }
        PageView {
            id: PageId::FinalLetter,
            blocks,
            button: None,
        }
    }
}

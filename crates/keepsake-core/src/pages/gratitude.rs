use std::time::Duration;

use crate::pages::{
    Block, DelayedButton, PageBehavior, PageInput, PageSignal, PageTimer, PageView, Tone,
};
use crate::reveal::StagedReveal;
use crate::script::PromptText;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;

/// First line at once, the rest one per interval, then a button.
#[derive(Debug)]
pub struct GratitudePage {
    lines: Vec<String>,
    reveal: StagedReveal,
    button: DelayedButton,
    button_delay: Duration,
    timers: TimerQueue<PageTimer>,
}

impl GratitudePage {
    pub fn new(text: &PromptText, timing: &Timing) -> Self {
        Self {
            lines: text.lines.clone(),
            reveal: StagedReveal::timed(text.lines.len(), timing.gratitude_step()),
            button: DelayedButton::new(text.button.clone()),
            button_delay: timing.button_delay(),
            timers: TimerQueue::new(),
        }
    }

    fn reveal_next(&mut self, now: Duration) -> Vec<PageSignal> {
        if !self.reveal.advance() {
            return Vec::new();
        }
        match self.reveal.next_delay() {
            Some(delay) => self.timers.schedule(now, delay, PageTimer::RevealNext),
            None => self.timers.schedule(now, self.button_delay, PageTimer::ShowButton),
        };
        vec![PageSignal::Revealed(
            self.lines[self.reveal.step() - 1].clone(),
        )]
    }
}

impl PageBehavior for GratitudePage {
    fn id(&self) -> PageId {
        PageId::Gratitude
    }

    fn mount(&mut self, now: Duration) -> Vec<PageSignal> {
        self.reveal_next(now)
    }

    fn handle(&mut self, input: PageInput, _now: Duration) -> Vec<PageSignal> {
        match input {
            PageInput::Activate => self.button.press(),
            PageInput::Tap | PageInput::Progress(_) => Vec::new(),
        }
    }

    fn on_timer(&mut self, timer: PageTimer, now: Duration) -> Vec<PageSignal> {
        match timer {
            PageTimer::RevealNext => self.reveal_next(now),
            PageTimer::ShowButton => self.button.show(),
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
            id: PageId::Gratitude,
            blocks: self.lines[..self.reveal.step()]
                .iter()
                .map(|line| Block::text(line.clone(), Tone::Secondary))
                .collect(),
            // The button only exists once the last line is out.
            button: self.reveal.is_complete().then(|| self.button.view()),
        }
    }
}

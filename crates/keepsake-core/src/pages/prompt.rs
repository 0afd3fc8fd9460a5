use std::time::Duration;

use crate::pages::{
    Block, DelayedButton, PageBehavior, PageInput, PageSignal, PageTimer, PageView, Tone,
};
use crate::script::PromptText;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;

/// Static text with a button that appears after a short pause.
#[derive(Debug)]
pub struct PromptPage {
    id: PageId,
    lines: Vec<String>,
    button: DelayedButton,
    button_delay: Duration,
    timers: TimerQueue<PageTimer>,
}

impl PromptPage {
    pub fn new(id: PageId, text: &PromptText, timing: &Timing) -> Self {
        Self {
            id,
            lines: text.lines.clone(),
            button: DelayedButton::new(text.button.clone()),
            button_delay: timing.button_delay(),
            timers: TimerQueue::new(),
        }
    }
}

impl PageBehavior for PromptPage {
    fn id(&self) -> PageId {
        self.id
    }

    fn mount(&mut self, now: Duration) -> Vec<PageSignal> {
        self.timers
            .schedule(now, self.button_delay, PageTimer::ShowButton);
        self.lines
            .iter()
            .map(|line| PageSignal::Revealed(line.clone()))
            .collect()
    }

    fn handle(&mut self, input: PageInput, _now: Duration) -> Vec<PageSignal> {
        match input {
            PageInput::Activate => self.button.press(),
            PageInput::Tap | PageInput::Progress(_) => Vec::new(),
        }
    }

    fn on_timer(&mut self, timer: PageTimer, _now: Duration) -> Vec<PageSignal> {
        match timer {
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
            id: self.id,
            blocks: self
                .lines
                .iter()
                .map(|line| Block::text(line.clone(), Tone::Secondary))
                .collect(),
            button: Some(self.button.view()),
        }
    }
}

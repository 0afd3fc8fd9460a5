use std::time::Duration;

use crate::pages::{
    Block, DelayedButton, PageBehavior, PageInput, PageSignal, PageTimer, PageView, Tone,
};
use crate::reveal::StagedReveal;
use crate::script::WelcomeText;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;

/// Heading at once, then each line after a pause, then the button.
#[derive(Debug)]
pub struct WelcomePage {
    heading: String,
    lines: Vec<String>,
    reveal: StagedReveal,
    button: DelayedButton,
    button_delay: Duration,
    timers: TimerQueue<PageTimer>,
}

impl WelcomePage {
    pub fn new(text: &WelcomeText, timing: &Timing) -> Self {
        Self {
            heading: text.heading.clone(),
            lines: text.lines.clone(),
            reveal: StagedReveal::timed(text.lines.len(), timing.welcome_step()),
            button: DelayedButton::new(text.button.clone()),
            button_delay: timing.welcome_button(),
            timers: TimerQueue::new(),
        }
    }

    fn schedule_next(&mut self, now: Duration) {
        match self.reveal.next_delay() {
            Some(delay) => self.timers.schedule(now, delay, PageTimer::RevealNext),
            None => self.timers.schedule(now, self.button_delay, PageTimer::ShowButton),
        };
    }
}

impl PageBehavior for WelcomePage {
    fn id(&self) -> PageId {
        PageId::Welcome
    }

    fn mount(&mut self, now: Duration) -> Vec<PageSignal> {
        self.schedule_next(now);
        vec![PageSignal::Revealed(self.heading.clone())]
    }

    fn handle(&mut self, input: PageInput, _now: Duration) -> Vec<PageSignal> {
        match input {
            PageInput::Activate => self.button.press(),
            PageInput::Tap | PageInput::Progress(_) => Vec::new(),
        }
    }

    fn on_timer(&mut self, timer: PageTimer, now: Duration) -> Vec<PageSignal> {
        match timer {
            PageTimer::RevealNext if self.reveal.advance() => {
                self.schedule_next(now);
                let line = &self.lines[self.reveal.step() - 1];
                vec![PageSignal::Revealed(line.clone())]
            }
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
        let mut blocks = vec![Block::text(self.heading.clone(), Tone::Title)];
        for (i, line) in self.lines[..self.reveal.step()].iter().enumerate() {
            let tone = if i == 0 { Tone::Secondary } else { Tone::Whisper };
            blocks.push(Block::text(line.clone(), tone));
        }
        PageView {
            id: PageId::Welcome,
            blocks,
            button: Some(self.button.view()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pages::test_support::{Harness, ms};
    use crate::pages::{PageInput, PageSignal};
    use crate::sequence::PageId;

    #[test]
    fn test_lines_reveal_every_1800ms_then_button() {
        let mut h = Harness::mount(PageId::Welcome);
        h.run_until(ms(10_000));

        let reveals = h.reveals();
        assert_eq!(reveals.len(), 3);
        assert_eq!(reveals[0], (ms(0), "Hi, Sannidhi.".to_string()));
        assert_eq!(reveals[1].0, ms(1800));
        assert_eq!(reveals[2].0, ms(3600));
        assert!(
            h.signals
                .contains(&(ms(4600), PageSignal::ButtonShown("I’m ready.".into())))
        );
    }

    #[test]
    fn test_activate_before_button_is_ignored() {
        let mut h = Harness::mount(PageId::Welcome);
        h.run_until(ms(3600));
        h.input(PageInput::Activate);
        assert!(h.advances().is_empty());

        h.run_until(ms(4600));
        h.input(PageInput::Activate);
        h.input(PageInput::Activate);
        assert_eq!(h.advances(), vec![ms(4600)]);
    }

    #[test]
    fn test_view_tracks_revealed_lines() {
        let mut h = Harness::mount(PageId::Welcome);
        assert_eq!(h.page.view().blocks.len(), 1);
        h.run_until(ms(1800));
        assert_eq!(h.page.view().blocks.len(), 2);
        assert!(!h.page.view().button.unwrap().visible);
    }
}

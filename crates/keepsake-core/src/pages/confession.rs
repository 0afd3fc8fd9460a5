use std::time::Duration;

use tracing::debug;

use crate::latch::Latch;
use crate::pages::{Block, PageBehavior, PageInput, PageSignal, PageTimer, PageView, Tone};
use crate::reveal::StagedReveal;
use crate::script::ConfessionText;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;

/// Lines one per interval, then the page moves on by itself.
#[derive(Debug)]
pub struct ConfessionPage {
    lines: Vec<String>,
    reveal: StagedReveal,
    advance: Latch,
    advance_delay: Duration,
    timers: TimerQueue<PageTimer>,
}

impl ConfessionPage {
    pub fn new(text: &ConfessionText, timing: &Timing) -> Self {
        Self {
            lines: text.lines.clone(),
            reveal: StagedReveal::timed(text.lines.len(), timing.confession_step()),
            advance: Latch::new(),
            advance_delay: timing.confession_advance(),
            timers: TimerQueue::new(),
        }
    }

    fn schedule_next(&mut self, now: Duration) {
        match self.reveal.next_delay() {
            Some(delay) => self.timers.schedule(now, delay, PageTimer::RevealNext),
            None => self.timers.schedule(now, self.advance_delay, PageTimer::Advance),
        };
    }
}

impl PageBehavior for ConfessionPage {
    fn id(&self) -> PageId {
        PageId::Confession
    }

    fn mount(&mut self, now: Duration) -> Vec<PageSignal> {
        self.schedule_next(now);
        Vec::new()
    }

    fn handle(&mut self, _input: PageInput, _now: Duration) -> Vec<PageSignal> {
        Vec::new()
    }

    fn on_timer(&mut self, timer: PageTimer, now: Duration) -> Vec<PageSignal> {
        match timer {
            PageTimer::RevealNext if self.reveal.advance() => {
                debug!(step = self.reveal.step(), "confession line");
                self.schedule_next(now);
                vec![PageSignal::Revealed(
                    self.lines[self.reveal.step() - 1].clone(),
                )]
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
        PageView {
            id: PageId::Confession,
            blocks: self.lines[..self.reveal.step()]
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    let tone = if i == 0 { Tone::Title } else { Tone::Primary };
                    Block::text(line.clone(), tone)
                })
                .collect(),
            button: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pages::test_support::{Harness, ms};
    use crate::pages::PageInput;
    use crate::sequence::PageId;

    #[test]
    fn test_reveals_then_auto_advance() {
        let mut h = Harness::mount(PageId::Confession);
        assert!(h.reveals().is_empty());
        h.run_until(ms(30_000));

        let times: Vec<_> = h.reveals().into_iter().map(|(at, _)| at).collect();
        assert_eq!(times, vec![ms(2800), ms(5600), ms(8400)]);
        assert_eq!(h.advances(), vec![ms(8400 + 6500)]);
        assert_eq!(h.page.pending_timers(), 0);
    }

    #[test]
    fn test_input_does_not_hurry_the_page() {
        let mut h = Harness::mount(PageId::Confession);
        h.input(PageInput::Activate);
        h.input(PageInput::Tap);
        h.input(PageInput::Progress(100));
        h.run_until(ms(14_899));
        assert!(h.advances().is_empty());
        assert_eq!(h.page.view().blocks.len(), 3);
    }
}

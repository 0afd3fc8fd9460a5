//! The orchestrator: owns the page index, the live page and the ambient state.
//!
//! A `Session` runs on a virtual clock measured from its start. Callers feed it
//! input with `handle_at` and move time forward with `advance_to`; both return
//! the events that happened, in order. Timers fire one at a time in deadline
//! order and `now` is set to each deadline before its handler runs.

use std::fmt;
use std::time::Duration;

use tracing::{debug, info};

use crate::ambient::Ambient;
use crate::pages::{Page, PageInput, PageSignal, PageView};
use crate::script::Script;
use crate::sequence::{PageId, PageSequence};
use crate::timing::Timing;

/// Input from the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    PointerMoved { x: u16, y: u16 },
    /// Click or key press on the page's button (or the heart).
    Activate,
    Tap,
    /// Slider value; clamped to `0..=100` by the page.
    Progress(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Revealed { page: PageId, text: String },
    ButtonShown { page: PageId, label: String },
    Haptic { duration: Duration },
    Advanced { from: PageId, to: PageId },
    IdleChanged(bool),
    Finished,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEvent::Revealed { page, text } => write!(f, "reveal   {page}: {text}"),
            SessionEvent::ButtonShown { page, label } => write!(f, "button   {page}: {label}"),
            SessionEvent::Haptic { duration } => write!(f, "haptic   {}ms", duration.as_millis()),
            SessionEvent::Advanced { from, to } => write!(f, "advance  {from} -> {to}"),
            SessionEvent::IdleChanged(true) => f.write_str("idle"),
            SessionEvent::IdleChanged(false) => f.write_str("active"),
            SessionEvent::Finished => f.write_str("finished"),
        }
    }
}

#[derive(Debug)]
pub struct Session {
    script: Script,
    timing: Timing,
    sequence: PageSequence,
    page: Page,
    ambient: Ambient,
    now: Duration,
    finished: bool,
}

impl Session {
    /// Starts a session at t=0 on the first page.
    ///
    /// Returns the events produced by mounting the first page.
    pub fn new(script: Script, timing: Timing) -> (Self, Vec<SessionEvent>) {
        let sequence = PageSequence::new();
        let (page, signals) = Page::mount(sequence.current(), &script, &timing, Duration::ZERO);
        let mut session = Self {
            ambient: Ambient::new(timing.idle_after()),
            script,
            timing,
            sequence,
            page,
            now: Duration::ZERO,
            finished: false,
        };
        info!(page = %session.page.id(), "session started");
        let mut events = Vec::new();
        session.apply(signals, &mut events);
        (session, events)
    }

    /// Handles `input` at the current time.
    pub fn handle(&mut self, input: Input) -> Vec<SessionEvent> {
        self.handle_at(self.now, input)
    }

    /// Fires every timer due by `now`, then handles `input` at `now`.
    pub fn handle_at(&mut self, now: Duration, input: Input) -> Vec<SessionEvent> {
        let mut events = self.advance_to(now);
        let now = self.now;

        let page_input = match input {
            Input::PointerMoved { x, y } => {
                if self.ambient.pointer_moved(now, x, y) {
                    events.push(SessionEvent::IdleChanged(false));
                }
                return events;
            }
            Input::Activate => PageInput::Activate,
            Input::Tap => PageInput::Tap,
            Input::Progress(value) => PageInput::Progress(value),
        };
        let signals = self.page.handle(page_input, now);
        self.apply(signals, &mut events);
        events
    }

    /// Moves the clock to `now`, firing due timers in deadline order.
    ///
    /// The clock never moves backwards; an earlier `now` only fires what is
    /// already due.
    pub fn advance_to(&mut self, now: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        loop {
            let page_due = self.page.next_deadline().filter(|d| *d <= now);
            let ambient_due = self.ambient.next_deadline().filter(|d| *d <= now);
            match (page_due, ambient_due) {
                // Page timers win ties.
                (Some(p), a) if a.is_none_or(|a| p <= a) => {
                    self.now = self.now.max(p);
                    if let Some(signals) = self.page.fire_due(p) {
                        self.apply(signals, &mut events);
                    }
                }
                (_, Some(a)) => {
                    self.now = self.now.max(a);
                    if self.ambient.fire_due(a) {
                        events.push(SessionEvent::IdleChanged(true));
                    }
                }
                _ => break,
            }
        }
        self.now = self.now.max(now);
        events
    }

    fn apply(&mut self, signals: Vec<PageSignal>, events: &mut Vec<SessionEvent>) {
        let page = self.page.id();
        for signal in signals {
            match signal {
                PageSignal::Revealed(text) => {
                    debug!(%page, %text, "revealed");
                    events.push(SessionEvent::Revealed { page, text });
                }
                PageSignal::ButtonShown(label) => {
                    events.push(SessionEvent::ButtonShown { page, label });
                }
                PageSignal::Haptic(duration) => events.push(SessionEvent::Haptic { duration }),
                PageSignal::Finished => {
                    self.finished = true;
                    events.push(SessionEvent::Finished);
                }
                PageSignal::Advance => self.advance_page(events),
            }
        }
    }

    fn advance_page(&mut self, events: &mut Vec<SessionEvent>) {
        let from = self.sequence.current();
        if !self.sequence.advance() {
            return;
        }
        let to = self.sequence.current();
        info!(%from, %to, at_ms = self.now.as_millis() as u64, "page advanced");

        // Replacing the page drops its timer queue.
        let (page, signals) = Page::mount(to, &self.script, &self.timing, self.now);
        self.page = page;
        events.push(SessionEvent::Advanced { from, to });
        self.apply(signals, events);
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.page.next_deadline(), self.ambient.next_deadline()) {
            (Some(p), Some(a)) => Some(p.min(a)),
            (p, a) => p.or(a),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn index(&self) -> usize {
        self.sequence.index()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn view(&self) -> PageView {
        self.page.view()
    }

    pub fn ambient(&self) -> &Ambient {
        &self.ambient
    }

    pub fn depth(&self) -> f32 {
        Ambient::depth(self.index())
    }

    pub fn calmness(&self) -> f32 {
        self.ambient.calmness(self.index())
    }

    /// True once the final letter has typed its last paragraph.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

//! Per-page reveal policies.
//!
//! Each page is a small state machine built from the shared pieces
//! (`StagedReveal`, `TimerQueue`, gesture counters, `Latch`). A page owns its
//! timers: when the session moves past it the page value is dropped and every
//! pending timer goes with it.
//!
//! ## Module Structure
//!
//! - `button.rs`: button that appears after a delay and advances once
//! - `welcome.rs`: timed lines, then a button
//! - `prompt.rs`: static text plus a button (consent, assurance)
//! - `heart.rs`: tap counter with a delayed reveal and auto-advance
//! - `gratitude.rs`: timed lines, then a button
//! - `drag.rs`: slider revealing a sentence word by word
//! - `confession.rs`: timed lines, then auto-advance
//! - `letter.rs`: typewriter paragraphs chained one after another

mod button;
mod confession;
mod drag;
mod gratitude;
mod heart;
mod letter;
mod prompt;
mod welcome;

use std::time::Duration;

pub use button::DelayedButton;
pub use confession::ConfessionPage;
pub use drag::DragPage;
pub use gratitude::GratitudePage;
pub use heart::{HeartPage, MAX_TAPS};
pub use letter::LetterPage;
pub use prompt::PromptPage;
pub use welcome::WelcomePage;

use crate::script::Script;
use crate::sequence::PageId;
use crate::timer::TimerQueue;
use crate::timing::Timing;

/// Haptic pulse for pressing a button.
pub const BUTTON_HAPTIC: Duration = Duration::from_millis(15);
/// Haptic pulse for every drag step.
pub const DRAG_TICK_HAPTIC: Duration = Duration::from_millis(4);
/// Haptic pulse for reaching the end of the slider.
pub const DRAG_DONE_HAPTIC: Duration = Duration::from_millis(20);

// ============================================================================
// Inputs, timers and signals
// ============================================================================

/// Discrete input delivered to the live page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInput {
    /// Click or press on the page's primary control.
    Activate,
    /// Tap on the heart.
    Tap,
    /// New slider value (clamped by the page).
    Progress(i32),
}

/// Timer events a page can schedule on its own queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTimer {
    RevealNext,
    ShowButton,
    Advance,
    Type,
}

/// Output of a page after input, mount, or a timer fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSignal {
    /// New content became visible.
    Revealed(String),
    /// A button became visible and can be pressed.
    ButtonShown(String),
    /// Best-effort haptic pulse request.
    Haptic(Duration),
    /// The page is done; move to the next one.
    Advance,
    /// The terminal page finished its last reveal.
    Finished,
}

// ============================================================================
// View
// ============================================================================

/// Visual weight of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Primary,
    Secondary,
    Whisper,
    Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Text {
        text: String,
        tone: Tone,
    },
    /// Sentence revealed word by word; the first `revealed` words are shown.
    Words {
        words: Vec<String>,
        revealed: usize,
    },
    Heart {
        taps: u32,
        threshold: u32,
    },
    Slider {
        progress: u8,
    },
    /// Partially typed text; `typing` is true until the text completes.
    Typed {
        text: String,
        tone: Tone,
        typing: bool,
    },
}

impl Block {
    pub fn text(text: impl Into<String>, tone: Tone) -> Self {
        Block::Text {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub label: String,
    pub visible: bool,
}

/// Render-agnostic snapshot of a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub id: PageId,
    pub blocks: Vec<Block>,
    pub button: Option<ButtonView>,
}

// ============================================================================
// Page behavior
// ============================================================================

/// Behavior shared by every page.
pub trait PageBehavior {
    fn id(&self) -> PageId;

    /// Schedules the page's first timers. Called once, right after construction.
    fn mount(&mut self, now: Duration) -> Vec<PageSignal>;

    fn handle(&mut self, input: PageInput, now: Duration) -> Vec<PageSignal>;

    fn on_timer(&mut self, timer: PageTimer, now: Duration) -> Vec<PageSignal>;

    fn timers(&self) -> &TimerQueue<PageTimer>;

    fn timers_mut(&mut self) -> &mut TimerQueue<PageTimer>;

    fn view(&self) -> PageView;
}

/// The live page.
#[derive(Debug)]
pub enum Page {
    Welcome(WelcomePage),
    Consent(PromptPage),
    Heart(HeartPage),
    Gratitude(GratitudePage),
    DragReveal(DragPage),
    Confession(ConfessionPage),
    Assurance(PromptPage),
    FinalLetter(LetterPage),
}

impl Page {
    /// Builds the page for `id` and mounts it at `now`.
    pub fn mount(id: PageId, script: &Script, timing: &Timing, now: Duration) -> (Self, Vec<PageSignal>) {
        let mut page = match id {
            PageId::Welcome => Page::Welcome(WelcomePage::new(&script.welcome, timing)),
            PageId::Consent => {
                Page::Consent(PromptPage::new(PageId::Consent, &script.consent, timing))
            }
            PageId::Heart => Page::Heart(HeartPage::new(&script.heart, timing)),
            PageId::Gratitude => Page::Gratitude(GratitudePage::new(&script.gratitude, timing)),
            PageId::DragReveal => Page::DragReveal(DragPage::new(&script.drag, timing)),
            PageId::Confession => {
                Page::Confession(ConfessionPage::new(&script.confession, timing))
            }
            PageId::Assurance => {
                Page::Assurance(PromptPage::new(PageId::Assurance, &script.assurance, timing))
            }
            PageId::FinalLetter => Page::FinalLetter(LetterPage::new(&script.letter, timing)),
        };
        let signals = page.behavior_mut().mount(now);
        (page, signals)
    }

    fn behavior(&self) -> &dyn PageBehavior {
        match self {
            Page::Welcome(p) => p,
            Page::Consent(p) | Page::Assurance(p) => p,
            Page::Heart(p) => p,
            Page::Gratitude(p) => p,
            Page::DragReveal(p) => p,
            Page::Confession(p) => p,
            Page::FinalLetter(p) => p,
        }
    }

    fn behavior_mut(&mut self) -> &mut dyn PageBehavior {
        match self {
            Page::Welcome(p) => p,
            Page::Consent(p) | Page::Assurance(p) => p,
            Page::Heart(p) => p,
            Page::Gratitude(p) => p,
            Page::DragReveal(p) => p,
            Page::Confession(p) => p,
            Page::FinalLetter(p) => p,
        }
    }

    pub fn id(&self) -> PageId {
        self.behavior().id()
    }

    pub fn handle(&mut self, input: PageInput, now: Duration) -> Vec<PageSignal> {
        self.behavior_mut().handle(input, now)
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.behavior().timers().next_deadline()
    }

    /// Fires the earliest timer due at or before `now`, if any.
    pub fn fire_due(&mut self, now: Duration) -> Option<Vec<PageSignal>> {
        let behavior = self.behavior_mut();
        let (at, timer) = behavior.timers_mut().pop_due(now)?;
        Some(behavior.on_timer(timer, at))
    }

    pub fn pending_timers(&self) -> usize {
        self.behavior().timers().len()
    }

    pub fn view(&self) -> PageView {
        self.behavior().view()
    }
}

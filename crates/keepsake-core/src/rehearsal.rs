//! Headless run of the whole presentation.
//!
//! An autopilot plays the part of the viewer: it presses buttons as soon as
//! they show, taps the heart up to its threshold and drags the slider to the
//! end, leaving a short gap between gestures. Everything runs on the
//! session's virtual clock, so a full rehearsal takes no wall time.

use std::fmt;
use std::time::Duration;

use anyhow::{Result, bail};
use tracing::debug;

use crate::interrupt::{self, InterruptedError};
use crate::pages::Block;
use crate::script::Script;
use crate::session::{Input, Session, SessionEvent};
use crate::timing::Timing;

/// Virtual time between two autopilot gestures.
const GESTURE_GAP: Duration = Duration::from_millis(250);
/// Slider distance covered by one autopilot drag.
const DRAG_STRIDE: i32 = 5;
/// A rehearsal longer than this is treated as stuck.
const TIME_LIMIT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub at: Duration,
    pub event: SessionEvent,
}

impl fmt::Display for TimelineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>8.3}s] {}", self.at.as_secs_f64(), self.event)
    }
}

/// Runs a full presentation and returns every event with its virtual time.
///
/// Stops with [`InterruptedError`] once Ctrl+C has been pressed.
pub fn rehearse(script: Script, timing: Timing) -> Result<Vec<TimelineEntry>> {
    run_until(script, timing, interrupt::is_interrupted)
}

fn run_until(
    script: Script,
    timing: Timing,
    interrupted: impl Fn() -> bool,
) -> Result<Vec<TimelineEntry>> {
    let (mut session, events) = Session::new(script, timing);
    let mut timeline = Vec::new();
    record(&mut timeline, Duration::ZERO, events);

    // One pointer move at the start so the idle transition shows up.
    let events = session.handle(Input::PointerMoved { x: 0, y: 0 });
    record(&mut timeline, session.now(), events);

    let mut ready_at = Duration::ZERO;
    while !session.is_finished() {
        if interrupted() {
            return Err(InterruptedError.into());
        }
        if session.now() > TIME_LIMIT {
            bail!(
                "Rehearsal did not finish within {}s (stuck on page {})",
                TIME_LIMIT.as_secs(),
                session.page().id()
            );
        }

        let gesture = next_gesture(&session);
        if let Some(input) = gesture
            && session.now() >= ready_at
        {
            debug!(?input, "autopilot");
            let events = session.handle(input);
            record(&mut timeline, session.now(), events);
            ready_at = session.now() + GESTURE_GAP;
            continue;
        }

        // Wake for whichever comes first: the next timer or the next gesture.
        let wake = match (gesture.map(|_| ready_at), session.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let Some(wake) = wake else {
            bail!(
                "Rehearsal stalled on page {} with nothing scheduled",
                session.page().id()
            );
        };
        let events = session.advance_to(wake);
        record(&mut timeline, session.now(), events);
    }
    Ok(timeline)
}

/// The gesture the live page is waiting for, if any.
fn next_gesture(session: &Session) -> Option<Input> {
    let view = session.view();
    if view.button.as_ref().is_some_and(|b| b.visible) {
        return Some(Input::Activate);
    }
    view.blocks.iter().find_map(|block| match block {
        Block::Heart { taps, threshold } if taps < threshold => Some(Input::Tap),
        Block::Slider { progress } if *progress < 100 => {
            Some(Input::Progress(i32::from(*progress) + DRAG_STRIDE))
        }
        _ => None,
    })
}

fn record(timeline: &mut Vec<TimelineEntry>, at: Duration, events: Vec<SessionEvent>) {
    timeline.extend(events.into_iter().map(|event| TimelineEntry { at, event }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::PageId;

    fn run() -> Vec<TimelineEntry> {
        rehearse(Script::default(), Timing::default().with_speed(8.0)).unwrap()
    }

    #[test]
    fn test_visits_every_page_in_order_and_finishes() {
        let timeline = run();
        let visited: Vec<PageId> = timeline
            .iter()
            .filter_map(|e| match e.event {
                SessionEvent::Advanced { to, .. } => Some(to),
                _ => None,
            })
            .collect();
        assert_eq!(visited, PageId::ALL[1..].to_vec());
        assert_eq!(timeline.last().unwrap().event, SessionEvent::Finished);
    }

    #[test]
    fn test_timeline_is_ordered() {
        let timeline = run();
        assert!(timeline.windows(2).all(|w| w[0].at <= w[1].at));
    }

    #[test]
    fn test_every_letter_paragraph_is_revealed() {
        let script = Script::default();
        let expected = script.letter.paragraphs.len();
        let timeline = rehearse(script, Timing::default().with_speed(8.0)).unwrap();
        let letter = timeline
            .iter()
            .filter(|e| {
                matches!(
                    &e.event,
                    SessionEvent::Revealed { page: PageId::FinalLetter, .. }
                )
            })
            .count();
        // Heading plus one entry per paragraph.
        assert_eq!(letter, expected + 1);
    }

    #[test]
    fn test_interrupt_stops_rehearsal() {
        let err = run_until(Script::default(), Timing::default(), || true).unwrap_err();
        assert!(err.downcast_ref::<InterruptedError>().is_some());
    }

    #[test]
    fn test_interrupt_mid_presentation() {
        let checks = std::cell::Cell::new(0);
        let err = run_until(Script::default(), Timing::default(), || {
            checks.set(checks.get() + 1);
            checks.get() > 10
        })
        .unwrap_err();
        assert!(err.downcast_ref::<InterruptedError>().is_some());
    }

    #[test]
    fn test_entry_display() {
        let entry = TimelineEntry {
            at: Duration::from_millis(1800),
            event: SessionEvent::Finished,
        };
        assert_eq!(entry.to_string(), "[   1.800s] finished");
    }
}

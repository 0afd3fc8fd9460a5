//! One-shot reveal timers on a virtual clock.
//!
//! A `TimerQueue` holds events keyed by their deadline. The owner decides what
//! "now" is and drains due events with `pop_due`. Dropping the queue drops every
//! pending event, which is how a page cancels all of its timers on teardown.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle returned by `TimerQueue::schedule`, used to cancel a pending event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    deadline: Duration,
    seq: u64,
}

/// Pending one-shot events ordered by deadline, then by scheduling order.
#[derive(Debug)]
pub struct TimerQueue<E> {
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), E>,
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Schedules `event` to fire once `delay` has elapsed after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, event: E) -> TimerHandle {
        let handle = TimerHandle {
            deadline: now.saturating_add(delay),
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        self.pending.insert((handle.deadline, handle.seq), event);
        handle
    }

    /// Cancels a pending event. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&(handle.deadline, handle.seq)).is_some()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes and returns the earliest event whose deadline is at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, E)> {
        let entry = self.pending.first_entry()?;
        let (deadline, _) = *entry.key();
        if deadline > now {
            return None;
        }
        Some((deadline, entry.remove()))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

//! Pending-timer queue: the delayed-callback primitive driving playback.
//!
//! Each timer carries a deadline and a typed payload describing what happens
//! when it fires. A host loop pumps the queue; stopping playback invalidates
//! every outstanding timer in one pass so nothing fires afterwards.

use std::collections::VecDeque;
use std::time::Instant;

/// What a pending timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    /// Pre-reveal delay for the message at `index`.
    Delay { index: usize },
    /// Typing phase for the message at `index`; reveals the message on fire.
    Typing { index: usize },
}

/// A scheduled callback.
#[derive(Debug)]
pub(crate) struct PendingTimer {
    /// Unique timer ID (for trace output).
    pub id: u64,
    /// When this timer should fire.
    pub fire_at: Instant,
    pub kind: TimerKind,
}

#[derive(Debug, Default)]
pub(crate) struct TimerQueue {
    timers: VecDeque<PendingTimer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn schedule(&mut self, fire_at: Instant, kind: TimerKind) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.timers.push_back(PendingTimer { id, fire_at, kind });
        id
    }

    /// Remove and return the earliest timer due at `now`, if any.
    pub fn pop_due(&mut self, now: Instant) -> Option<PendingTimer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.fire_at <= now)
            .min_by_key(|(_, t)| t.fire_at)
            .map(|(i, _)| i)?;
        self.timers.remove(index)
    }

    /// Earliest pending deadline, so a host loop can sleep precisely.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.iter().map(|t| t.fire_at).min()
    }

    /// Drop every pending timer. Guaranteed to leave the queue empty.
    pub fn invalidate_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

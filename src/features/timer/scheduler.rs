//! Cooperative timer scheduler.
//!
//! A single-threaded replacement for `setInterval`/`setTimeout`: timers are
//! keyed by explicit [`TimerHandle`]s and fire only when the owner pumps the
//! scheduler with [`Scheduler::pop_due`]. Time is virtual and monotonic; the
//! owner decides how far it advances, which makes every timer path testable
//! without sleeping.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Identifies a scheduled timer. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What a timer means when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second of session time. Carries the session generation that
    /// scheduled it so late ticks from an older session are ignored.
    Tick {
        /// Session generation at scheduling time.
        generation: u64,
    },
    /// Periodic persistence checkpoint.
    Persist,
    /// The motivational message has been shown long enough.
    MotivationExpired,
    /// The break reminder has been shown long enough.
    BreakReminderExpired,
}

#[derive(Debug)]
struct Entry {
    event: TimerEvent,
    period: Option<Duration>,
}

/// Virtual-time timer queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    // (due, seq, id); cancelled ids stay here until popped
    queue: BinaryHeap<Reverse<(Duration, u64, u64)>>,
    entries: HashMap<u64, Entry>,
}

impl Scheduler {
    /// Create an empty scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Fire `event` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        self.insert(delay, event, None)
    }

    /// Fire `event` every `period`, first at `now + period`.
    ///
    /// A zero period is bumped to one millisecond so the queue always makes
    /// progress.
    pub fn schedule_repeating(&mut self, period: Duration, event: TimerEvent) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        self.insert(period, event, Some(period))
    }

    fn insert(&mut self, delay: Duration, event: TimerEvent, period: Option<Duration>) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert(id, Entry { event, period });
        self.push(self.now + delay, id);
        TimerHandle(id)
    }

    fn push(&mut self, due: Duration, id: u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse((due, seq, id)));
    }

    /// Cancel a timer. Returns false if it already fired (one-shot) or was
    /// cancelled before.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.entries.remove(&handle.0).is_some()
    }

    /// Number of live timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Pop the next timer due at or before `until`.
    ///
    /// Virtual time moves to the fire time of the returned timer. When nothing
    /// else is due, time moves to `until` and `None` is returned. Repeating
    /// timers are re-armed before being returned, so a handler may cancel them.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerHandle, TimerEvent)> {
        while let Some(Reverse((due, _, id))) = self.queue.peek().copied() {
            if !self.entries.contains_key(&id) {
                self.queue.pop();
                continue;
            }
            if due > until {
                break;
            }

            self.queue.pop();
            self.now = self.now.max(due);

            let (event, period) = match self.entries.get(&id) {
                Some(entry) => (entry.event, entry.period),
                None => continue,
            };
            match period {
                Some(period) => self.push(due + period, id),
                None => {
                    self.entries.remove(&id);
                },
            }
            return Some((TimerHandle(id), event));
        }

        self.now = self.now.max(until);
        None
    }
}

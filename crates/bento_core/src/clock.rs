//! # Virtual Clock
//!
//! Millisecond scheduler for one-shot and repeating actions.
//!
//! ## Design
//!
//! The host advances time explicitly. Every timer carries an owner tag
//! (a card index) so that everything a card scheduled can be found and
//! cancelled together. Firings are delivered one at a time through
//! [`Scheduler::advance`], so a handler that cancels a timer due later in
//! the same advance prevents it from firing.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Identifier of a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq)]
pub struct Firing<E> {
    /// The timer that fired.
    pub id: TimerId,
    /// Owner tag given at scheduling time.
    pub owner: usize,
    /// Clock time of the firing.
    pub at: Duration,
    /// Payload given at scheduling time.
    pub payload: E,
}

#[derive(Debug, Clone)]
struct Entry<E> {
    owner: usize,
    due_ms: u64,
    seq: u64,
    period_ms: Option<u64>,
    payload: E,
}

/// Virtual clock with owner-tagged timers.
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    /// Current time in milliseconds.
    now_ms: u64,
    /// Next timer ID to hand out.
    next_id: u64,
    /// Scheduling sequence, breaks ties between timers due at the same instant.
    next_seq: u64,
    /// Live timers.
    entries: HashMap<TimerId, Entry<E>>,
    /// Due order: (due time, sequence) -> timer.
    queue: BTreeMap<(u64, u64), TimerId>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    /// Creates an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            next_id: 1,
            next_seq: 0,
            entries: HashMap::new(),
            queue: BTreeMap::new(),
        }
    }

    /// Returns the current clock time.
    #[must_use]
    pub fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms)
    }

    /// Schedules a one-shot action `delay` from now.
    pub fn schedule_once(&mut self, owner: usize, delay: Duration, payload: E) -> TimerId {
        self.insert(owner, to_millis(delay), None, payload)
    }

    /// Schedules an action every `period`, first firing one period from now.
    ///
    /// A zero period is treated as one millisecond so the clock always makes progress.
    pub fn schedule_repeating(&mut self, owner: usize, period: Duration, payload: E) -> TimerId {
        let period_ms = to_millis(period).max(1);
        self.insert(owner, period_ms, Some(period_ms), payload)
    }

    fn insert(&mut self, owner: usize, delay_ms: u64, period_ms: Option<u64>, payload: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        let due_ms = self.now_ms.saturating_add(delay_ms);

        self.queue.insert((due_ms, seq), id);
        self.entries.insert(
            id,
            Entry {
                owner,
                due_ms,
                seq,
                period_ms,
                payload,
            },
        );
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Cancels a timer.
    ///
    /// Returns false if the timer already fired (one-shot), was cancelled, or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.entries.remove(&id) {
            Some(entry) => {
                self.queue.remove(&(entry.due_ms, entry.seq));
                true
            }
            None => false,
        }
    }

    /// Cancels every timer with the given owner, returning how many were live.
    pub fn cancel_owned(&mut self, owner: usize) -> usize {
        let ids: Vec<TimerId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    /// Cancels everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.queue.clear();
    }

    /// Returns true if the timer is still scheduled.
    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of live timers with the given owner.
    #[must_use]
    pub fn pending_for(&self, owner: usize) -> usize {
        self.entries.values().filter(|entry| entry.owner == owner).count()
    }

    /// Number of live timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }
}

impl<E: Clone> Scheduler<E> {
    /// Advances the clock by `dt`, handing each due timer to `dispatch` in due order.
    ///
    /// Timers due at the same instant fire in scheduling order. The handler
    /// receives the scheduler and may schedule or cancel freely; a timer
    /// cancelled by an earlier handler never fires, and a repeating timer
    /// cancelled by its own handler is not re-armed.
    pub fn advance<F>(&mut self, dt: Duration, mut dispatch: F)
    where
        F: FnMut(&mut Self, Firing<E>),
    {
        let target = self.now_ms.saturating_add(to_millis(dt));

        while let Some(firing) = self.pop_due(target) {
            tracing::trace!(timer = firing.id.raw(), owner = firing.owner, at_ms = self.now_ms, "timer fired");
            dispatch(self, firing);
        }

        self.now_ms = target;
    }

    /// Pops the earliest timer due at or before `target`, moving the clock to its due time.
    fn pop_due(&mut self, target: u64) -> Option<Firing<E>> {
        let (&(due_ms, seq), &id) = self.queue.iter().next()?;
        if due_ms > target {
            return None;
        }
        self.queue.remove(&(due_ms, seq));
        self.now_ms = self.now_ms.max(due_ms);

        let rearm = self.entries.get(&id).and_then(|entry| entry.period_ms);
        let firing = match rearm {
            Some(period_ms) => {
                let next_seq = self.bump_seq();
                let entry = self.entries.get_mut(&id)?;
                entry.due_ms = due_ms.saturating_add(period_ms);
                entry.seq = next_seq;
                self.queue.insert((entry.due_ms, entry.seq), id);
                Firing {
                    id,
                    owner: entry.owner,
                    at: Duration::from_millis(due_ms),
                    payload: entry.payload.clone(),
                }
            }
            None => {
                let entry = self.entries.remove(&id)?;
                Firing {
                    id,
                    owner: entry.owner,
                    at: Duration::from_millis(due_ms),
                    payload: entry.payload,
                }
            }
        };
        Some(firing)
    }
}

fn to_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

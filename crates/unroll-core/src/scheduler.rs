//! Cancelable delayed callbacks on the coordinator's logical clock.
//!
//! Entries carry plain data (`A`) instead of closures; the owner of the
//! scheduler decides what an action means when it comes due. Every entry is
//! tagged with a [`TimerOwner`] so that a whole session's worth of pending
//! work can be dropped in one call when that session ends.

use crate::timeline::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Who a pending timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerOwner {
    Preload,
    Session(SessionId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent<A> {
    pub id: TimerId,
    pub fire_at_ms: f64,
    pub owner: TimerOwner,
    pub action: A,
}

#[derive(Debug)]
pub struct Scheduler<A> {
    next_id: u64,
    pending: Vec<ScheduledEvent<A>>,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, fire_at_ms: f64, owner: TimerOwner, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(ScheduledEvent {
            id,
            fire_at_ms,
            owner,
            action,
        });
        id
    }

    /// Remove a single timer. Returns false if it already fired or was never scheduled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|event| event.id != id);
        self.pending.len() != before
    }

    /// Drop every pending timer belonging to `owner`, returning how many were removed.
    pub fn invalidate(&mut self, owner: TimerOwner) -> usize {
        let before = self.pending.len();
        self.pending.retain(|event| event.owner != owner);
        before - self.pending.len()
    }

    /// Take the earliest timer that is due at `now_ms`, if any.
    ///
    /// Ties on `fire_at_ms` resolve in scheduling order, so callers draining
    /// this in a loop see non-decreasing fire times.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<ScheduledEvent<A>> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                a.fire_at_ms
                    .total_cmp(&b.fire_at_ms)
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|(idx, _)| idx)?;
        if self.pending[idx].fire_at_ms <= now_ms {
            Some(self.pending.remove(idx))
        } else {
            None
        }
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|event| event.fire_at_ms)
            .min_by(f64::total_cmp)
    }

    pub fn pending_for(&self, owner: TimerOwner) -> usize {
        self.pending
            .iter()
            .filter(|event| event.owner == owner)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent<A>> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

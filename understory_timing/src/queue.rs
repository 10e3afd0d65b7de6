// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer queue with cancellable handles.

use alloc::collections::BTreeMap;

use hashbrown::HashMap;

/// Handle to a scheduled timer.
///
/// Handles are issued from a monotonically increasing counter and are never
/// reused within one [`TimerQueue`]. Cancelling an expired or already
/// cancelled handle is a no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw sequence number of this handle.
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A timer popped from the queue because its deadline passed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<T> {
    /// Handle the timer was scheduled under.
    pub id: TimerId,
    /// The time the timer was due.
    pub deadline: u64,
    /// Caller payload.
    pub payload: T,
}

/// A queue of pending timers ordered by deadline.
///
/// Entries with equal deadlines expire in the order they were scheduled.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    next_id: u64,
    // Keyed by (deadline, id) so iteration order is expiry order.
    entries: BTreeMap<(u64, TimerId), T>,
    deadlines: HashMap<TimerId, u64>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Schedules `payload` to expire `delay` units after `now`.
    ///
    /// The deadline saturates at `u64::MAX`.
    pub fn schedule(&mut self, now: u64, delay: u64, payload: T) -> TimerId {
        self.schedule_at(now.saturating_add(delay), payload)
    }

    /// Schedules `payload` to expire at an absolute `deadline`.
    pub fn schedule_at(&mut self, deadline: u64, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert((deadline, id), payload);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancels a pending timer, returning its payload.
    ///
    /// Returns `None` if the timer already expired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let deadline = self.deadlines.remove(&id)?;
        self.entries.remove(&(deadline, id))
    }

    /// Returns `true` if `id` is still pending.
    pub fn contains(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    /// Returns the deadline of a pending timer.
    pub fn deadline(&self, id: TimerId) -> Option<u64> {
        self.deadlines.get(&id).copied()
    }

    /// Returns the earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    ///
    /// Call repeatedly until it returns `None` to drain everything that is due.
    pub fn pop_due(&mut self, now: u64) -> Option<Expired<T>> {
        let &(deadline, id) = self.entries.keys().next()?;
        if deadline > now {
            return None;
        }
        let payload = self.entries.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        Some(Expired {
            id,
            deadline,
            payload,
        })
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cancels every pending timer.
    ///
    /// Issued ids stay retired; new timers continue from the same counter.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.deadlines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn new_queue_is_empty() {
        let q = TimerQueue::<u32>::new();
        assert!(q.is_empty());
        assert_eq!(q.len(), 0);
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn pop_due_respects_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(100, 50, 'a');

        assert!(q.pop_due(149).is_none(), "not due one unit early");
        let e = q.pop_due(150).unwrap();
        assert_eq!(e.payload, 'a');
        assert_eq!(e.deadline, 150);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_expire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule_at(10, 1);
        q.schedule_at(10, 2);
        q.schedule_at(5, 0);

        let mut order = Vec::new();
        while let Some(e) = q.pop_due(10) {
            order.push(e.payload);
        }
        assert_eq!(order, [0, 1, 2]);
    }

    #[test]
    fn cancelled_timer_never_expires() {
        let mut q = TimerQueue::new();
        let id = q.schedule(0, 10, "x");
        assert!(q.contains(id));
        assert_eq!(q.cancel(id), Some("x"));
        assert!(!q.contains(id));
        assert!(q.pop_due(u64::MAX).is_none());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut q = TimerQueue::new();
        let id = q.schedule(0, 10, ());
        assert!(q.cancel(id).is_some());
        assert!(q.cancel(id).is_none());
    }

    #[test]
    fn cancelling_expired_id_does_not_touch_new_timers() {
        let mut q = TimerQueue::new();
        let old = q.schedule(0, 1, "old");
        assert!(q.pop_due(1).is_some());

        let new = q.schedule(1, 1, "new");
        assert_ne!(old, new);
        assert!(new.get() > old.get(), "ids are issued in increasing order");
        assert_eq!(q.cancel(old), None);
        assert!(q.contains(new));
    }

    #[test]
    fn deadline_saturates() {
        let mut q = TimerQueue::new();
        let id = q.schedule(u64::MAX - 1, 10, ());
        assert_eq!(q.deadline(id), Some(u64::MAX));
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = TimerQueue::new();
        let a = q.schedule(0, 1, ());
        q.schedule(0, 2, ());
        q.clear();
        assert!(q.is_empty());
        assert!(!q.contains(a));
        assert_eq!(q.next_deadline(), None);
    }
}

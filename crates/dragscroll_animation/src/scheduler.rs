//! Timer scheduler
//!
//! One-shot timers on a virtual clock. The host advances time explicitly and
//! drains due timers in order, so timer-driven behaviour is deterministic and
//! testable without sleeping.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct TimerId;
}

struct Timer<K> {
    due_ms: u64,
    /// Scheduling order, breaks ties between timers due at the same instant
    seq: u64,
    payload: K,
}

/// Cancellable one-shot timers keyed by [`TimerId`]
///
/// Ids are versioned: cancelling an id whose timer already fired (or was
/// cancelled) is a no-op and can never hit a newer timer.
pub struct TimerScheduler<K> {
    timers: SlotMap<TimerId, Timer<K>>,
    now_ms: u64,
    next_seq: u64,
}

impl<K> TimerScheduler<K> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            now_ms: 0,
            next_seq: 0,
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `payload` to fire `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, payload: K) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.insert(Timer {
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            payload,
        })
    }

    /// Cancel a pending timer, returning its payload if it had not fired
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        self.timers.remove(id).map(|timer| timer.payload)
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Due time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.timers.values().map(|timer| timer.due_ms).min()
    }

    /// Remove and return the earliest timer due at or before `until_ms`,
    /// moving the clock to its due time
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerId, K)> {
        let id = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.due_ms, timer.seq))
            .map(|(id, _)| id)?;

        let timer = self.timers.remove(id)?;
        self.now_ms = self.now_ms.max(timer.due_ms);
        tracing::trace!(now_ms = self.now_ms, "timer fired");
        Some((id, timer.payload))
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<K> Default for TimerScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

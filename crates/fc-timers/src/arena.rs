//! `TimerArena` — sparse tick-keyed timer queue with cancellation.
//!
//! # Why this exists
//!
//! Most ticks nothing is due.  Scanning a flat list of pending timers every
//! tick would cost O(T) regardless of how many actually fire.  The arena
//! inverts the problem the same way a wake queue does: timers register the
//! tick at which they need attention, and each tick the engine drains only
//! the ids due at (or before) that tick — O(due) work instead of O(T).
//!
//! # Cancellation
//!
//! Cancellation is lazy on the queue side: `cancel` removes the entry record
//! and leaves the queued id behind; `drain_due` drops ids whose entry no
//! longer exists.  This keeps `cancel` O(1) amortised, which matters because
//! `clear()` — cancel *everything*, called on every session phase exit — is
//! on the restart hot path.
//!
//! # Performance note
//!
//! `BTreeMap` gives O(log W) insert/pop where W = number of distinct pending
//! fire ticks.  A session holds well under a dozen timers, so the constant
//! is tiny.

use std::collections::BTreeMap;

use fc_core::{Tick, TimerId};
use rustc_hash::FxHashMap;

/// One pending timer: when it fires and whether it re-arms.
#[derive(Copy, Clone, Debug)]
struct Entry {
    fire_at: Tick,
    /// `Some(period_ticks)` for repeating timers; `None` for one-shots.
    period: Option<u64>,
}

/// A priority queue mapping fire ticks → timer handles, with O(1) cancel.
#[derive(Default)]
pub struct TimerArena {
    queue:   BTreeMap<Tick, Vec<TimerId>>,
    entries: FxHashMap<TimerId, Entry>,
    next_id: u32,
}

impl TimerArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a one-shot timer firing `delay_ticks` after `now`.
    ///
    /// A delay of 0 fires on the next `drain_due(now)` call.
    pub fn after(&mut self, now: Tick, delay_ticks: u64) -> TimerId {
        self.insert(now + delay_ticks, None)
    }

    /// Arm a repeating timer first firing `period_ticks` after `now`, then
    /// every `period_ticks` thereafter until cancelled.
    ///
    /// # Panics
    /// Panics in debug mode if `period_ticks == 0` (would fire forever within
    /// a single drain).
    pub fn every(&mut self, now: Tick, period_ticks: u64) -> TimerId {
        debug_assert!(period_ticks > 0, "repeating timer period must be > 0");
        self.insert(now + period_ticks, Some(period_ticks))
    }

    /// Cancel a pending timer.  Returns `false` if the handle was unknown or
    /// already fired (one-shots forget themselves on fire).
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Cancel every pending timer.  After this call no previously armed
    /// timer can ever be returned by `drain_due` — the session teardown
    /// guarantee.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.entries.clear();
    }

    /// Remove and return every timer due at or before `now`, in arming order
    /// within each tick.  Repeating timers are re-armed `period` ticks after
    /// `now`; one-shots are forgotten.
    pub fn drain_due(&mut self, now: Tick) -> Vec<TimerId> {
        let mut due = Vec::new();
        while let Some((&tick, _)) = self.queue.first_key_value() {
            if tick > now {
                break;
            }
            // Unwrap is fine: first_key_value just proved the key exists.
            let ids = self.queue.remove(&tick).unwrap_or_default();
            for id in ids {
                // Skip ids cancelled since they were queued, and stale queue
                // positions left behind by an earlier re-arm.
                match self.entries.get(&id) {
                    Some(entry) if entry.fire_at == tick => {}
                    _ => continue,
                }
                match self.entries.get(&id).and_then(|e| e.period) {
                    Some(period) => {
                        let next = now + period;
                        self.entries.insert(id, Entry { fire_at: next, period: Some(period) });
                        self.queue.entry(next).or_default().push(id);
                    }
                    None => {
                        self.entries.remove(&id);
                    }
                }
                due.push(id);
            }
        }
        due
    }

    /// The tick a pending timer will next fire at, or `None` if unknown.
    pub fn scheduled_at(&self, id: TimerId) -> Option<Tick> {
        self.entries.get(&id).map(|e| e.fire_at)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Private ───────────────────────────────────────────────────────────

    fn insert(&mut self, fire_at: Tick, period: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, Entry { fire_at, period });
        self.queue.entry(fire_at).or_default().push(id);
        id
    }
}

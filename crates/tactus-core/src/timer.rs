//! One-shot hold timers on the input clock.
//!
//! The engine never sleeps. Hosts call [`crate::GestureEngine::advance`] with
//! the current input-clock time (typically from a platform timer armed for
//! [`HoldTimers::next_deadline`]) and due timers fire then.

use crate::input::PointerId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Handle of a scheduled hold timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// A scheduled hold check for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldTimer {
    /// Timer handle
    pub id: TimerId,
    /// Session the timer belongs to
    pub pointer: PointerId,
    /// Input-clock time at which the timer fires
    pub deadline_ms: u64,
}

/// Pending hold timers ordered by deadline.
#[derive(Debug, Default)]
pub struct HoldTimers {
    next_id: u64,
    pending: BTreeMap<(u64, TimerId), PointerId>,
    deadlines: HashMap<TimerId, u64>,
}

impl HoldTimers {
    /// Create an empty timer queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a hold check for `pointer` at `deadline_ms`.
    pub fn schedule(&mut self, pointer: PointerId, deadline_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert((deadline_ms, id), pointer);
        self.deadlines.insert(id, deadline_ms);
        id
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.deadlines
            .remove(&id)
            .is_some_and(|deadline_ms| self.pending.remove(&(deadline_ms, id)).is_some())
    }

    /// Remove and return every timer due at `now_ms`, earliest first.
    pub fn take_due(&mut self, now_ms: u64) -> Vec<HoldTimer> {
        let later = self.pending.split_off(&(now_ms.saturating_add(1), TimerId(0)));
        let due = std::mem::replace(&mut self.pending, later);
        due.into_iter()
            .map(|((deadline_ms, id), pointer)| {
                self.deadlines.remove(&id);
                HoldTimer {
                    id,
                    pointer,
                    deadline_ms,
                }
            })
            .collect()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.deadlines.clear();
    }
}

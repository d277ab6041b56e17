//! View-local bookkeeping for calls in flight.
//!
//! `BusyTracker` locks one resource id for the duration of a mutating call;
//! the lock releases when the guard drops, however the call settled.
//! `FetchEpoch` hands out tickets that go stale the moment a newer fetch
//! starts, so a late response can never overwrite fresher state.

use std::collections::HashSet;

use leptos::prelude::*;

// ============================================================================
// Per-item locks
// ============================================================================

#[derive(Clone, Copy)]
pub struct BusyTracker {
    busy: RwSignal<HashSet<i64>>,
}

impl BusyTracker {
    pub fn new() -> Self {
        Self {
            busy: RwSignal::new(HashSet::new()),
        }
    }

    /// Locks `id` for one call. `None` while a previous call for the same
    /// id is still in flight, which is what makes double-submits a no-op.
    pub fn try_begin(&self, id: i64) -> Option<BusyGuard> {
        let acquired = self.busy.try_update(|set| set.insert(id)).unwrap_or(false);
        acquired.then_some(BusyGuard { tracker: *self, id })
    }

    /// Reactive read, drives disabled states in the views.
    pub fn is_busy(&self, id: i64) -> bool {
        self.busy.with(|set| set.contains(&id))
    }
}

impl Default for BusyTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the id on drop, success and failure alike.
pub struct BusyGuard {
    tracker: BusyTracker,
    id: i64,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let id = self.id;
        // The surrounding reactive scope may already be gone.
        self.tracker.busy.try_update(|set| {
            set.remove(&id);
        });
    }
}

// ============================================================================
// Fetch staleness
// ============================================================================

#[derive(Clone, Copy)]
pub struct FetchEpoch {
    epoch: StoredValue<u64>,
}

impl FetchEpoch {
    pub fn new() -> Self {
        Self {
            epoch: StoredValue::new(0),
        }
    }

    /// Starts a new fetch round, invalidating every earlier ticket.
    pub fn begin(&self) -> FetchTicket {
        let epoch = self.epoch.get_value() + 1;
        self.epoch.set_value(epoch);
        FetchTicket {
            source: *self,
            epoch,
        }
    }
}

impl Default for FetchEpoch {
    fn default() -> Self {
        Self::new()
    }
}

/// Captured when a fetch starts; check before applying its response.
#[derive(Clone, Copy)]
pub struct FetchTicket {
    source: FetchEpoch,
    epoch: u64,
}

impl FetchTicket {
    /// False once a newer fetch began or the owning scope was disposed.
    pub fn is_live(&self) -> bool {
        self.source.epoch.try_get_value() == Some(self.epoch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_is_suppressed_until_the_guard_drops() {
        let busy = BusyTracker::new();

        let guard = busy.try_begin(5).unwrap();
        assert!(busy.is_busy(5));
        assert!(busy.try_begin(5).is_none());

        // Another id stays independent.
        assert!(busy.try_begin(6).is_some());

        drop(guard);
        assert!(!busy.is_busy(5));
        assert!(busy.try_begin(5).is_some());
    }

    #[test]
    fn a_newer_fetch_invalidates_older_tickets() {
        let epoch = FetchEpoch::new();

        let first = epoch.begin();
        assert!(first.is_live());

        let second = epoch.begin();
        assert!(!first.is_live());
        assert!(second.is_live());
    }
}

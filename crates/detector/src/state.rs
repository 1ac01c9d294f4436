//! Per-series prior state
//!
//! The minimal memory carried between cycles: the last analyzed point of each
//! series. Detection itself does not consult it (the transition is decided
//! from the last two points of the fresh series); it is kept for diagnostics.
//!
//! Entries are stamped with the pass that last touched them so that series
//! which stop being tracked can be evicted.

use breakwatch_core::{SeriesKey, Timestamp};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Last analyzed point of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorState {
    pub timestamp: Timestamp,
    pub value: f64,
    /// Regression-predicted value at that point
    pub expected: f64,
    /// Whether the point was inside its sigma boundary
    pub within_boundaries: bool,
}

#[derive(Debug, Clone, Copy)]
struct StateEntry {
    state: PriorState,
    last_pass: u64,
}

/// Thread-safe prior-state map
///
/// DashMap shards give per-key locking, so series analyzed in parallel never
/// contend on unrelated keys.
pub struct PriorStateStore {
    entries: Arc<DashMap<SeriesKey, StateEntry>>,
    pass: Arc<AtomicU64>,
}

impl PriorStateStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            pass: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a new pass, returns its sequence number
    pub fn begin_pass(&self) -> u64 {
        self.pass.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current_pass(&self) -> u64 {
        self.pass.load(Ordering::SeqCst)
    }

    /// Overwrite the state for a key
    pub fn record(&self, key: &SeriesKey, state: PriorState) {
        let entry = StateEntry {
            state,
            last_pass: self.current_pass(),
        };
        self.entries.insert(key.clone(), entry);
    }

    pub fn get(&self, key: &SeriesKey) -> Option<PriorState> {
        self.entries.get(key).map(|e| e.state)
    }

    /// Drop keys not touched in the last `max_idle_passes` passes
    ///
    /// Returns the number of evicted keys.
    pub fn evict_idle(&self, max_idle_passes: u64) -> usize {
        let current = self.current_pass();
        let before = self.entries.len();
        self.entries
            .retain(|_, e| current.saturating_sub(e.last_pass) <= max_idle_passes);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for PriorStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PriorStateStore {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            pass: Arc::clone(&self.pass),
        }
    }
}

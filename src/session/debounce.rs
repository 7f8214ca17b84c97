use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::Clock;
use crate::config::MAX_DEBOUNCE_MS;

struct Pending<V> {
    value: V,
    deadline: DateTime<Utc>,
}

/// Coalesces bursts of updates per key.
///
/// Scheduling a key again before its deadline replaces the value and pushes
/// the deadline back. Time comes from the injected [`Clock`]; the debouncer
/// never sleeps, callers poll [`Debouncer::take_due`].
pub struct Debouncer<K, V> {
    delay: TimeDelta,
    clock: Arc<dyn Clock>,
    pending: HashMap<K, Pending<V>>,
}

impl<K: Eq + Hash + Clone, V> Debouncer<K, V> {
    /// Create a debouncer that waits `delay_ms` after the last update.
    ///
    /// Delays above [`MAX_DEBOUNCE_MS`] are clamped to it.
    pub fn new(delay_ms: u64, clock: Arc<dyn Clock>) -> Self {
        let delay_ms = delay_ms.min(MAX_DEBOUNCE_MS) as i64;
        Self {
            delay: TimeDelta::try_milliseconds(delay_ms).unwrap_or(TimeDelta::zero()),
            clock,
            pending: HashMap::new(),
        }
    }

    /// Record an update for `key`, restarting its delay.
    pub fn schedule(&mut self, key: K, value: V) {
        let deadline = self
            .clock
            .now()
            .checked_add_signed(self.delay)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.pending.insert(key, Pending { value, deadline });
    }

    /// Remove and return every entry whose delay has elapsed, oldest first.
    pub fn take_due(&mut self) -> Vec<(K, V)> {
        let now = self.clock.now();
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, p)| p.deadline <= now)
            .map(|(k, _)| k.clone())
            .collect();
        self.remove_sorted(due)
    }

    /// Remove and return every pending entry regardless of deadline, oldest first.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        let all: Vec<K> = self.pending.keys().cloned().collect();
        self.remove_sorted(all)
    }

    /// Whether `key` has an unflushed update.
    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    /// Number of keys with unflushed updates.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest deadline among pending entries.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.values().map(|p| p.deadline).min()
    }

    fn remove_sorted(&mut self, keys: Vec<K>) -> Vec<(K, V)> {
        let mut entries: Vec<(K, Pending<V>)> = keys
            .into_iter()
            .filter_map(|k| self.pending.remove(&k).map(|p| (k, p)))
            .collect();
        entries.sort_by_key(|(_, p)| p.deadline);
        entries.into_iter().map(|(k, p)| (k, p.value)).collect()
    }
}

//! Per-variant cooldown: the guard against a write's own echo notification.
//!
//! A variant admitted to the pipeline enters the store immediately, so
//! duplicate notifications arriving while a read+classify+write sequence is
//! in flight are dropped rather than racing it. Entries expire on a timer,
//! not on lookup, so memory is bounded by recently-admitted ids rather than
//! the whole catalog. Best-effort and single-process — not a distributed
//! lock.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Admission gate for the reconcile pipeline.
///
/// Implementations must make insert-if-absent atomic: two concurrent
/// `admit` calls for the same id may admit at most one caller.
pub trait CooldownStore: Send + Sync {
    /// Returns `true` and records the id if it is not already present;
    /// returns `false` while a previous admission is still cooling down.
    fn admit(&self, variant_id: &str) -> bool;
}

/// In-memory store for single-instance deployments.
///
/// Each admission spawns a timer task that removes the entry after the
/// window elapses. A process restart clears all entries, which is
/// acceptable: the cost of a lost entry is one redundant read that the
/// write guard then skips.
pub struct InMemoryCooldown {
    window: Duration,
    entries: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryCooldown {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl CooldownStore for InMemoryCooldown {
    fn admit(&self, variant_id: &str) -> bool {
        let inserted = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(variant_id.to_owned());

        if !inserted {
            return false;
        }

        let entries = Arc::clone(&self.entries);
        let id = variant_id.to_owned();
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&id);
        });

        true
    }
}

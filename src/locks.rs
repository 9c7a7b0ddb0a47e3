//! Per-document mutual exclusion.
//!
//! Mutations to the same logical document must not interleave their
//! metadata/body writes; mutations to different documents run in parallel.
//! The registry hands out one mutex per key — codex mutations key by entry
//! id (the entry's path can change between saves), manuscript mutations
//! key by metadata file path.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct KeyLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutex for `key`, created on first use. Clones of the same key share
    /// one mutex for the lifetime of the registry.
    pub fn get(&self, key: &str) -> Arc<Mutex<()>> {
        let mut map = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(key.to_string()).or_default().clone()
    }
}

/// Lock `mutex`, recovering the guard if a previous holder panicked. The
/// guarded region only writes whole files atomically, so a poisoned lock
/// cannot protect anything half-done.
pub fn hold(mutex: &Mutex<()>) -> MutexGuard<'_, ()> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

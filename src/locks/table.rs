//! The shared key → slot table.

use super::slot::Slot;
use super::types::{ChannelReport, Request};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Concurrency-safe map from key to its slot.
///
/// The table mutex guards only map bookkeeping; blocking acquisition runs
/// against the slot after the table mutex is dropped, so contention on one
/// key never stalls operations on another.
///
/// Slots are created on first reference and removed only by
/// `reset_by_key`. Idle slots are not evicted, so the table grows with
/// every distinct key ever touched.
#[derive(Debug, Default)]
pub struct LockTable {
    slots: Mutex<HashMap<String, Arc<Slot>>>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the slot for `key`, creating it if absent.
    fn slot(&self, key: &str) -> Arc<Slot> {
        let mut slots = self.slots.lock();
        Arc::clone(
            slots
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Slot::new(key))),
        )
    }

    /// Make one acquisition attempt for `key`.
    ///
    /// Returns `false` when the attempt was cancelled or the slot was closed
    /// mid-wait; the caller retries and a fresh slot is resolved each time.
    pub fn lock(&self, key: &str, source_addr: &str, remote_addr: SocketAddr) -> bool {
        let slot = self.slot(key);
        let outcome = slot.acquire(Request::new(source_addr, remote_addr));
        debug!(key, source = source_addr, outcome = ?outcome, "lock attempt finished");
        outcome.is_acquired()
    }

    /// Acquire `key`, retrying against the current table state until the
    /// request becomes the holder.
    pub fn lock_blocking(&self, key: &str, source_addr: &str, remote_addr: SocketAddr) {
        while !self.lock(key, source_addr, remote_addr) {}
    }

    /// Release `key`. Harmless if it is not held.
    pub fn unlock(&self, key: &str) {
        self.slot(key).release();
    }

    /// Close and forget the slot for `key`, failing all of its waiters.
    ///
    /// The slot is closed before the table mutex is dropped, so a fresh slot
    /// for `key` never coexists with an open stale one.
    ///
    /// Returns `false` if the key was unknown.
    pub fn reset_by_key(&self, key: &str) -> bool {
        let mut slots = self.slots.lock();
        match slots.remove(key) {
            Some(slot) => {
                slot.close();
                true
            }
            None => false,
        }
    }

    /// Revoke every claim `source_addr` holds or waits for, across all keys.
    ///
    /// Keys stay in the table. Returns the number of released holders.
    pub fn reset_by_source(&self, source_addr: &str) -> usize {
        let slots: Vec<Arc<Slot>> = self.slots.lock().values().cloned().collect();
        slots
            .iter()
            .filter(|slot| slot.cancel_by_source(source_addr))
            .count()
    }

    /// Reports of every currently held key, sorted by key.
    pub fn keys(&self) -> Vec<ChannelReport> {
        let slots: Vec<Arc<Slot>> = self.slots.lock().values().cloned().collect();
        let mut reports: Vec<ChannelReport> =
            slots.iter().filter_map(|slot| slot.snapshot()).collect();
        reports.sort_by(|a, b| a.key.cmp(&b.key));
        reports
    }

    /// Number of keys the table currently knows, held or not.
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    pub(crate) fn slot_for_test(&self, key: &str) -> Arc<Slot> {
        self.slot(key)
    }
}

//! Per-key exclusivity primitive.
//!
//! A slot is a capacity-one semaphore plus a registry of requests that have
//! announced intent to acquire. The registry is what lets a reset reach a
//! waiter that is already parked: a waiter whose entry vanished gives up
//! instead of installing itself as a stale holder.

use super::types::{AcquireOutcome, ChannelReport, Request};
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Default)]
struct SlotState {
    held: bool,
    holder: Option<Request>,
    pending: HashMap<Uuid, Request>,
    closed: bool,
}

/// The lock state of a single key.
#[derive(Debug)]
pub struct Slot {
    key: String,
    state: Mutex<SlotState>,
    available: Condvar,
}

impl Slot {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: Mutex::new(SlotState::default()),
            available: Condvar::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Register `request` and block until it becomes the holder, is
    /// cancelled, or the slot is closed.
    pub fn acquire(&self, request: Request) -> AcquireOutcome {
        let id = request.id;
        let mut state = self.state.lock();

        if state.closed {
            return AcquireOutcome::Closed;
        }
        state.pending.insert(id, request);

        while state.held && !state.closed && state.pending.contains_key(&id) {
            self.available.wait(&mut state);
        }

        if state.closed {
            return AcquireOutcome::Closed;
        }

        match state.pending.remove(&id) {
            Some(request) => {
                state.held = true;
                state.holder = Some(request);
                AcquireOutcome::Acquired
            }
            None => AcquireOutcome::Cancelled,
        }
    }

    /// Free the slot. A no-op when nothing is held.
    pub fn release(&self) {
        let mut state = self.state.lock();
        if Self::release_locked(&mut state) {
            self.available.notify_one();
        }
    }

    fn release_locked(state: &mut SlotState) -> bool {
        state.holder = None;
        std::mem::replace(&mut state.held, false)
    }

    /// Drop every pending request from `source_addr` and release the slot if
    /// that source is the holder.
    ///
    /// Returns whether the holder was released.
    pub fn cancel_by_source(&self, source_addr: &str) -> bool {
        let mut state = self.state.lock();

        let before = state.pending.len();
        state
            .pending
            .retain(|_, request| request.source_addr != source_addr);
        let cancelled_waiters = before != state.pending.len();

        let holder_matches = state
            .holder
            .as_ref()
            .is_some_and(|holder| holder.source_addr == source_addr);
        if holder_matches {
            Self::release_locked(&mut state);
        }

        if cancelled_waiters || holder_matches {
            // Cancelled waiters must wake to notice their entry is gone.
            self.available.notify_all();
        }

        holder_matches
    }

    /// Permanently disable the slot, failing every current and future waiter.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.pending.clear();
        Self::release_locked(&mut state);
        self.available.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Report of the current holder, if any.
    pub fn snapshot(&self) -> Option<ChannelReport> {
        let state = self.state.lock();
        state.holder.as_ref().map(|holder| ChannelReport {
            key: self.key.clone(),
            holder: holder.clone(),
        })
    }

    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }
}

//! In-memory lock table for lockcenter.
//!
//! # Model
//!
//! - A [`Request`] describes one acquisition attempt: identity, source
//!   address, remote endpoint and creation time.
//! - A [`Slot`] owns one key's contention: a capacity-one semaphore and the
//!   set of pending requests.
//! - The [`LockTable`] maps keys to slots, creating them lazily.
//!
//! # Guarantees
//!
//! At most one request holds a key at any instant. Waiters for the same key
//! are served in no particular order. A reset by key closes the slot and
//! fails every parked waiter; callers retry and land on a fresh slot.

mod slot;
mod table;
mod types;


// Re-export public API
pub use slot::Slot;
pub use table::LockTable;
pub use types::{AcquireOutcome, ChannelReport, Request};

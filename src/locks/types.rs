//! Lock request and report definitions.

use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use uuid::Uuid;

/// One acquisition attempt for a key.
///
/// A request owns a lock only while it is the slot's current holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Unique identity used to find the request in a slot's pending set.
    pub id: Uuid,

    /// Address the lock is attributed to for reset-by-source.
    pub source_addr: String,

    /// Full peer endpoint of the connection that asked for the lock.
    pub remote_addr: SocketAddr,

    /// When the request was enqueued.
    pub created_at: DateTime<Utc>,
}

impl Request {
    pub fn new(source_addr: impl Into<String>, remote_addr: SocketAddr) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_addr: source_addr.into(),
            remote_addr,
            created_at: Utc::now(),
        }
    }
}

/// How a call to `Slot::acquire` ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The request is now the holder.
    Acquired,
    /// A reset-by-source removed the request while it waited.
    Cancelled,
    /// The slot was closed by a reset-by-key.
    Closed,
}

impl AcquireOutcome {
    pub fn is_acquired(&self) -> bool {
        matches!(self, AcquireOutcome::Acquired)
    }
}

/// Snapshot of a held key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub key: String,
    pub holder: Request,
}

impl std::fmt::Display for ChannelReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (source: {}, endpoint: {}, since: {})",
            self.key,
            self.holder.source_addr,
            self.holder.remote_addr,
            self.holder.created_at.to_rfc3339()
        )
    }
}

//! Client for the manager port.

use super::entry::KeyEntry;
use super::{connect, expect_ok, validate_key};
use crate::error::{LockError, Result};
use crate::protocol::{IoPolicy, ManagerCommand, TimedStream};
use chrono::DateTime;

/// Lists and resets locks through a manager port.
#[derive(Debug, Clone)]
pub struct ManagerClient {
    address: String,
    policy: IoPolicy,
}

impl ManagerClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_policy(address, IoPolicy::default())
    }

    pub fn with_policy(address: impl Into<String>, policy: IoPolicy) -> Self {
        Self {
            address: address.into(),
            policy,
        }
    }

    fn request(&self, command: ManagerCommand) -> Result<TimedStream> {
        let mut conn = connect(&self.address, self.policy)?;
        conn.write_all(command.as_bytes())?;
        Ok(conn)
    }

    /// Every currently held key, sorted by key.
    pub fn keys(&self) -> Result<Vec<KeyEntry>> {
        let mut conn = self.request(ManagerCommand::Keys)?;

        let count = conn.read_u32()?;
        let mut entries = Vec::with_capacity(count.min(1024) as usize);
        for _ in 0..count {
            let key = conn.read_str8()?;
            let source_addr = conn.read_str8()?;
            let remote_addr = conn.read_str8()?;
            let unix_time = conn.read_i64()?;
            let created_at = DateTime::from_timestamp(unix_time, 0).ok_or_else(|| {
                LockError::Protocol(format!("timestamp out of range: {}", unix_time))
            })?;

            entries.push(KeyEntry {
                key,
                source_addr,
                remote_addr,
                created_at,
            });
        }
        Ok(entries)
    }

    /// Reset each key in turn; stops at the first failure.
    pub fn reset_keys(&self, keys: &[String]) -> Result<()> {
        for key in keys {
            validate_key(key)?;
        }
        self.reset_batch(ManagerCommand::ResetByKey, keys, "resetting key")
    }

    /// Reset each source address in turn. An empty list resets this
    /// client's own address.
    pub fn reset_sources(&self, sources: &[String]) -> Result<()> {
        if sources.is_empty() {
            return self.reset_own_source();
        }
        self.reset_batch(ManagerCommand::ResetBySource, sources, "resetting source")
    }

    /// Reset every lock attributed to this client's own address.
    pub fn reset_own_source(&self) -> Result<()> {
        let mut conn = self.request(ManagerCommand::ResetBySource)?;
        conn.write_u32(0)?;
        expect_ok(conn.read_u8()?, "resetting own source")
    }

    fn reset_batch(&self, command: ManagerCommand, items: &[String], what: &str) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut conn = self.request(command)?;
        conn.write_u32(items.len() as u32)?;
        for item in items {
            conn.write_str8(item)?;
            expect_ok(conn.read_u8()?, &format!("{} failed: {}", what, item))?;
        }
        Ok(())
    }
}

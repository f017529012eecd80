//! Client for the mutex port.

use super::{connect, expect_ok, validate_key};
use crate::error::Result;
use crate::protocol::{Action, IoPolicy, TimedStream};

/// Issues lock operations against a mutex port.
#[derive(Debug, Clone)]
pub struct MutexClient {
    address: String,
    policy: IoPolicy,
}

impl MutexClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_policy(address, IoPolicy::default())
    }

    pub fn with_policy(address: impl Into<String>, policy: IoPolicy) -> Self {
        Self {
            address: address.into(),
            policy,
        }
    }

    fn request(&self, action: Action) -> Result<TimedStream> {
        let mut conn = connect(&self.address, self.policy)?;
        conn.write_u8(action as u8)?;
        Ok(conn)
    }

    /// Block until `key` is held on behalf of `source` (or of this
    /// connection's own address when `None`).
    pub fn lock(&self, key: &str, source: Option<&str>) -> Result<()> {
        validate_key(key)?;
        let mut conn = self.request(Action::Lock)?;
        conn.write_str8(key)?;
        conn.write_str8(source.unwrap_or(""))?;
        expect_ok(conn.await_u8()?, &format!("locking key: {}", key))
    }

    pub fn unlock(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut conn = self.request(Action::Unlock)?;
        conn.write_str8(key)?;
        expect_ok(conn.read_u8()?, &format!("unlocking key: {}", key))
    }

    pub fn reset_key(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        let mut conn = self.request(Action::ResetByKey)?;
        conn.write_str8(key)?;
        expect_ok(conn.read_u8()?, &format!("resetting key: {}", key))
    }

    /// Reset every lock held by `source`, or by this client's own address
    /// when `None`.
    pub fn reset_source(&self, source: Option<&str>) -> Result<()> {
        let source = source.unwrap_or("");
        let mut conn = self.request(Action::ResetBySource)?;
        conn.write_str8(source)?;
        expect_ok(conn.read_u8()?, &format!("resetting source: {}", source))
    }
}

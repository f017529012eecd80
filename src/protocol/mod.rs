//! Wire protocol for the mutex and manager ports.
//!
//! Both ports speak little-endian binary framing. Strings are sent as a
//! one-byte length followed by UTF-8 bytes (`str8`); repeated elements are
//! prefixed by a four-byte count.
//!
//! # Mutex port
//!
//! | Action | Payload | Reply |
//! |---|---|---|
//! | 1 Lock | key, source override | `+` once acquired |
//! | 2 Unlock | key | `+` |
//! | 3 ResetByKey | key | `+` |
//! | 4 ResetBySource | source override | `+` |
//!
//! # Manager port
//!
//! Four ASCII bytes select the command: `KEYS`, `RSET`, `RSBS`.

mod socket_io;

#[cfg(test)]
mod tests;

pub use socket_io::{IoPolicy, TimedStream};

use crate::error::{LockError, Result};

/// Reply byte for a completed operation.
pub const STATUS_OK: u8 = b'+';

/// Reply byte for a failed operation.
pub const STATUS_FAIL: u8 = b'-';

/// Width of a manager command on the wire.
pub const COMMAND_LEN: usize = 4;

/// Longest string a `str8` field can carry.
pub const MAX_STR8_LEN: usize = u8::MAX as usize;

/// Actions accepted on the mutex port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Action {
    Lock = 1,
    Unlock = 2,
    ResetByKey = 3,
    ResetBySource = 4,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Lock => "lock",
            Action::Unlock => "unlock",
            Action::ResetByKey => "reset_by_key",
            Action::ResetBySource => "reset_by_source",
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = LockError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(Action::Lock),
            2 => Ok(Action::Unlock),
            3 => Ok(Action::ResetByKey),
            4 => Ok(Action::ResetBySource),
            other => Err(LockError::Protocol(format!("undefined action {}", other))),
        }
    }
}

/// Commands accepted on the manager port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerCommand {
    /// List held keys with owner metadata.
    Keys,
    /// Reset a batch of keys.
    ResetByKey,
    /// Reset a batch of source addresses.
    ResetBySource,
}

impl ManagerCommand {
    pub fn as_bytes(&self) -> &'static [u8; COMMAND_LEN] {
        match self {
            ManagerCommand::Keys => b"KEYS",
            ManagerCommand::ResetByKey => b"RSET",
            ManagerCommand::ResetBySource => b"RSBS",
        }
    }

    pub fn parse(raw: &[u8; COMMAND_LEN]) -> Result<Self> {
        match raw {
            b"KEYS" => Ok(ManagerCommand::Keys),
            b"RSET" => Ok(ManagerCommand::ResetByKey),
            b"RSBS" => Ok(ManagerCommand::ResetBySource),
            other => Err(LockError::Protocol(format!(
                "not a meaningful command: {:?}",
                String::from_utf8_lossy(other)
            ))),
        }
    }
}

impl std::fmt::Display for ManagerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.as_bytes()))
    }
}

//! Clients for the mutex and manager ports.
//!
//! Every operation opens its own connection, mirroring the server's one
//! action per connection discipline.

mod entry;
mod manager;
mod mutex;


pub use entry::KeyEntry;
pub use manager::ManagerClient;
pub use mutex::MutexClient;

use crate::error::{LockError, Result};
use crate::protocol::{IoPolicy, MAX_STR8_LEN, STATUS_FAIL, STATUS_OK, TimedStream};
use std::net::TcpStream;

/// Reject keys the wire format cannot carry.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(LockError::UserError("key is empty".to_string()));
    }
    if key.len() > MAX_STR8_LEN {
        return Err(LockError::UserError(format!(
            "key is more than {} bytes: {}",
            MAX_STR8_LEN, key
        )));
    }
    Ok(())
}

fn connect(address: &str, policy: IoPolicy) -> Result<TimedStream> {
    let stream = TcpStream::connect(address).map_err(|e| {
        LockError::Io(std::io::Error::new(
            e.kind(),
            format!("unable to connect to {}: {}", address, e),
        ))
    })?;
    Ok(TimedStream::new(stream, policy))
}

fn expect_ok(status: u8, what: &str) -> Result<()> {
    match status {
        STATUS_OK => Ok(()),
        STATUS_FAIL => Err(LockError::Remote(what.to_string())),
        other => Err(LockError::Protocol(format!(
            "unexpected status byte {:#04x} for {}",
            other, what
        ))),
    }
}

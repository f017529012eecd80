//! Deadline-guarded socket I/O.
//!
//! Every read and write applies a fresh timeout sized to the payload before
//! touching the socket, so a silent peer cannot pin a handler thread during
//! framing. `idle` lifts the timeout for the one phase allowed to block
//! without bound: waiting on a contended lock.

use super::MAX_STR8_LEN;
use crate::error::{LockError, Result};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Deadline formula: `base + bytes / throughput` (whole seconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoPolicy {
    base: Duration,
    throughput: u64,
}

impl IoPolicy {
    pub fn new(base: Duration, throughput: u64) -> Self {
        Self {
            // A zero duration means "no timeout" to the socket layer.
            base: base.max(Duration::from_millis(1)),
            throughput: throughput.max(1),
        }
    }

    /// Deadline for an operation moving `expected_bytes` bytes.
    pub fn deadline_for(&self, expected_bytes: usize) -> Duration {
        self.base + Duration::from_secs(expected_bytes as u64 / self.throughput)
    }
}

impl Default for IoPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(30), 625_000)
    }
}

/// A TCP stream whose every operation runs under an `IoPolicy` deadline.
#[derive(Debug)]
pub struct TimedStream {
    stream: TcpStream,
    policy: IoPolicy,
}

impl TimedStream {
    pub fn new(stream: TcpStream, policy: IoPolicy) -> Self {
        Self { stream, policy }
    }

    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.stream.peer_addr()?)
    }

    pub fn get_ref(&self) -> &TcpStream {
        &self.stream
    }

    fn set_deadline(&self, expected_bytes: usize) -> Result<()> {
        let deadline = self.policy.deadline_for(expected_bytes);
        self.stream.set_read_timeout(Some(deadline))?;
        self.stream.set_write_timeout(Some(deadline))?;
        Ok(())
    }

    /// Remove the deadline until the next guarded operation.
    pub fn idle(&self) -> Result<()> {
        self.stream.set_read_timeout(None)?;
        self.stream.set_write_timeout(None)?;
        Ok(())
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.set_deadline(buf.len())?;
        self.stream.read_exact(buf)?;
        Ok(())
    }

    fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.set_deadline(0)?;
        let mut buf = [0u8; N];
        self.stream.read_exact(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_fixed::<1>()?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_fixed::<4>()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_fixed::<8>()?))
    }

    /// Read one byte with no deadline, for replies that wait on lock
    /// contention.
    pub fn await_u8(&mut self) -> Result<u8> {
        self.idle()?;
        let mut buf = [0u8; 1];
        self.stream.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    /// Read a one-byte length followed by that many UTF-8 bytes.
    pub fn read_str8(&mut self) -> Result<String> {
        let len = self.read_u8()? as usize;
        let mut buf = vec![0u8; len];
        self.read_exact(&mut buf)?;
        String::from_utf8(buf)
            .map_err(|e| LockError::Protocol(format!("string is not valid UTF-8: {}", e)))
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.set_deadline(bytes.len())?;
        self.stream.write_all(bytes)?;
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_all(&[value])
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_all(&value.to_le_bytes())
    }

    /// Write a one-byte length followed by the string bytes.
    ///
    /// Strings longer than 255 bytes are rejected rather than truncated.
    pub fn write_str8(&mut self, value: &str) -> Result<()> {
        let len = u8::try_from(value.len()).map_err(|_| {
            LockError::Protocol(format!(
                "string of {} bytes exceeds the {} byte field limit",
                value.len(),
                MAX_STR8_LEN
            ))
        })?;

        let mut frame = Vec::with_capacity(value.len() + 1);
        frame.push(len);
        frame.extend_from_slice(value.as_bytes());
        self.write_all(&frame)
    }
}

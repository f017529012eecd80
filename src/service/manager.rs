//! Manager port: introspection and batch resets.

use super::listener::ConnectionHandler;
use super::{report_failure, source_addr_of};
use crate::error::Result;
use crate::locks::LockTable;
use crate::protocol::{COMMAND_LEN, IoPolicy, ManagerCommand, STATUS_OK, TimedStream};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use tracing::{debug, info};

/// Serves `KEYS`, `RSET` and `RSBS`.
pub struct ManagerHandler {
    table: Arc<LockTable>,
    policy: IoPolicy,
}

impl ManagerHandler {
    pub fn new(table: Arc<LockTable>, policy: IoPolicy) -> Self {
        Self { table, policy }
    }

    fn process(&self, conn: &mut TimedStream, peer: SocketAddr) -> Result<()> {
        let mut raw = [0u8; COMMAND_LEN];
        conn.read_exact(&mut raw)?;
        let command = ManagerCommand::parse(&raw)?;
        debug!(peer = %peer, command = %command, "manager request");

        match command {
            ManagerCommand::Keys => self.keys(conn),
            ManagerCommand::ResetByKey | ManagerCommand::ResetBySource => {
                self.reset(conn, peer, command)
            }
        }
    }

    /// Count, then key / source / endpoint / creation time for each held key.
    fn keys(&self, conn: &mut TimedStream) -> Result<()> {
        let reports = self.table.keys();

        conn.write_u32(reports.len() as u32)?;
        for report in &reports {
            conn.write_str8(&report.key)?;
            conn.write_str8(&report.holder.source_addr)?;
            conn.write_str8(&report.holder.remote_addr.to_string())?;
            conn.write_i64(report.holder.created_at.timestamp())?;
        }
        Ok(())
    }

    /// Apply a batch of resets, acknowledging each item as it is done.
    ///
    /// An `RSBS` batch of zero items resets the caller's own address.
    fn reset(&self, conn: &mut TimedStream, peer: SocketAddr, command: ManagerCommand) -> Result<()> {
        let count = conn.read_u32()?;

        if command == ManagerCommand::ResetBySource && count == 0 {
            let source = source_addr_of(peer);
            let released = self.table.reset_by_source(&source);
            info!(peer = %peer, source, released, "self-service source reset");
            return conn.write_u8(STATUS_OK);
        }

        for _ in 0..count {
            let target = conn.read_str8()?;
            match command {
                ManagerCommand::ResetBySource => {
                    let released = self.table.reset_by_source(&target);
                    info!(peer = %peer, source = target, released, "source reset");
                }
                _ => {
                    let known = self.table.reset_by_key(&target);
                    info!(peer = %peer, key = target, known, "key reset");
                }
            }
            conn.write_u8(STATUS_OK)?;
        }
        Ok(())
    }
}

impl ConnectionHandler for ManagerHandler {
    fn name(&self) -> &'static str {
        "manager"
    }

    fn handle(&self, stream: TcpStream, peer: SocketAddr) {
        let mut conn = TimedStream::new(stream, self.policy);
        if let Err(e) = self.process(&mut conn, peer) {
            report_failure(self.name(), &mut conn, peer, &e);
        }
    }
}

//! Mutex port: one lock operation per connection.

use super::listener::ConnectionHandler;
use super::{report_failure, resolve_source};
use crate::error::{LockError, Result};
use crate::locks::LockTable;
use crate::protocol::{Action, IoPolicy, STATUS_OK, TimedStream};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use tracing::{debug, warn};

/// Serves Lock / Unlock / ResetByKey / ResetBySource.
pub struct MutexHandler {
    table: Arc<LockTable>,
    policy: IoPolicy,
}

impl MutexHandler {
    pub fn new(table: Arc<LockTable>, policy: IoPolicy) -> Self {
        Self { table, policy }
    }

    fn process(&self, conn: &mut TimedStream, peer: SocketAddr) -> Result<()> {
        let action = Action::try_from(conn.read_u8()?)?;
        debug!(peer = %peer, action = action.as_str(), "mutex request");

        match action {
            Action::Lock => self.lock(conn, peer),
            Action::Unlock => {
                let key = read_key(conn)?;
                conn.idle()?;
                self.table.unlock(&key);
                debug!(peer = %peer, key, "lock released");
                conn.write_u8(STATUS_OK)
            }
            Action::ResetByKey => {
                let key = read_key(conn)?;
                conn.idle()?;
                let known = self.table.reset_by_key(&key);
                debug!(peer = %peer, key, known, "key reset");
                conn.write_u8(STATUS_OK)
            }
            Action::ResetBySource => {
                let source = resolve_source(conn.read_str8()?, peer);
                conn.idle()?;
                let released = self.table.reset_by_source(&source);
                debug!(peer = %peer, source, released, "source reset");
                conn.write_u8(STATUS_OK)
            }
        }
    }

    fn lock(&self, conn: &mut TimedStream, peer: SocketAddr) -> Result<()> {
        let key = read_key(conn)?;
        let source = resolve_source(conn.read_str8()?, peer);

        // Contention may last arbitrarily long.
        conn.idle()?;
        self.table.lock_blocking(&key, &source, peer);
        debug!(peer = %peer, key, source, "lock acquired");

        if let Err(e) = conn.write_u8(STATUS_OK) {
            warn!(peer = %peer, key, error = %e, "client vanished after acquiring, releasing");
            self.table.unlock(&key);
            return Err(e);
        }
        Ok(())
    }
}

impl ConnectionHandler for MutexHandler {
    fn name(&self) -> &'static str {
        "mutex"
    }

    fn handle(&self, stream: TcpStream, peer: SocketAddr) {
        let mut conn = TimedStream::new(stream, self.policy);
        if let Err(e) = self.process(&mut conn, peer) {
            report_failure(self.name(), &mut conn, peer, &e);
        }
    }
}

fn read_key(conn: &mut TimedStream) -> Result<String> {
    let key = conn.read_str8()?;
    if key.is_empty() {
        return Err(LockError::Protocol("key should be defined".to_string()));
    }
    Ok(key)
}

//! TCP services over the shared lock table.
//!
//! - The mutex service (primary port) runs one lock operation per
//!   connection.
//! - The manager service (primary port + 1) lists held keys and performs
//!   batch resets for operators.
//!
//! Each accepted connection gets its own thread. A failure on one
//! connection is logged and answered with a `-` byte; it never reaches the
//! accept loop or other connections.

mod listener;
mod manager;
mod mutex;


pub use listener::{ConnectionHandler, Listener};
pub use manager::ManagerHandler;
pub use mutex::MutexHandler;

use crate::config::ServerConfig;
use crate::error::{LockError, Result};
use crate::locks::LockTable;
use crate::protocol::{IoPolicy, STATUS_FAIL, TimedStream};
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info};

/// The client-identifying part of a peer address: its IP, without the port.
pub fn source_addr_of(peer: SocketAddr) -> String {
    peer.ip().to_string()
}

/// Use `requested` as the source address unless it is empty.
pub(crate) fn resolve_source(requested: String, peer: SocketAddr) -> String {
    if requested.is_empty() {
        source_addr_of(peer)
    } else {
        requested
    }
}

/// Log a failed connection and send a best-effort failure byte.
pub(crate) fn report_failure(service: &str, conn: &mut TimedStream, peer: SocketAddr, err: &LockError) {
    if err.is_peer_gone() {
        debug!(service, peer = %peer, "peer closed connection");
    } else {
        error!(service, peer = %peer, error = %err, "service process failed");
    }

    if let Err(e) = conn.write_u8(STATUS_FAIL) {
        debug!(service, peer = %peer, error = %e, "unable to send failure status");
    }
}

/// Both listeners bound over one lock table, not yet accepting.
pub struct Server {
    table: Arc<LockTable>,
    mutex: Listener,
    manager: Listener,
}

impl Server {
    /// Bind the mutex and manager listeners at the addresses `config` derives.
    pub fn bind(config: &ServerConfig) -> Result<Self> {
        let mutex_addr = config.primary_address()?;
        let manager_addr = config.manager_address()?;
        Self::bind_addrs(&mutex_addr, &manager_addr, config.io_policy())
    }

    /// Bind the listeners at explicit addresses.
    pub fn bind_addrs(mutex_addr: &str, manager_addr: &str, policy: IoPolicy) -> Result<Self> {
        let table = Arc::new(LockTable::new());

        let mutex = Listener::bind(
            mutex_addr,
            Arc::new(MutexHandler::new(Arc::clone(&table), policy)),
        )?;
        let manager = Listener::bind(
            manager_addr,
            Arc::new(ManagerHandler::new(Arc::clone(&table), policy)),
        )?;

        Ok(Self {
            table,
            mutex,
            manager,
        })
    }

    pub fn table(&self) -> &Arc<LockTable> {
        &self.table
    }

    /// Start both accept loops.
    pub fn start(self) -> Result<ServerHandle> {
        let mutex_addr = self.mutex.local_addr()?;
        let manager_addr = self.manager.local_addr()?;

        let threads = vec![self.mutex.spawn()?, self.manager.spawn()?];
        info!(mutex = %mutex_addr, manager = %manager_addr, "lock server started");

        Ok(ServerHandle {
            table: self.table,
            mutex_addr,
            manager_addr,
            threads,
        })
    }
}

/// A running server.
pub struct ServerHandle {
    table: Arc<LockTable>,
    mutex_addr: SocketAddr,
    manager_addr: SocketAddr,
    threads: Vec<JoinHandle<()>>,
}

impl ServerHandle {
    pub fn mutex_addr(&self) -> SocketAddr {
        self.mutex_addr
    }

    pub fn manager_addr(&self) -> SocketAddr {
        self.manager_addr
    }

    pub fn table(&self) -> &Arc<LockTable> {
        &self.table
    }

    /// Block until both accept loops exit.
    pub fn wait(self) {
        for thread in self.threads {
            if thread.join().is_err() {
                error!("accept loop panicked");
            }
        }
    }
}

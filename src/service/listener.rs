//! Accept loop shared by the mutex and manager services.

use crate::error::{LockError, Result};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{error, info};

/// Per-connection protocol logic run by a [`Listener`].
pub trait ConnectionHandler: Send + Sync + 'static {
    /// Short service name used in logs and thread names.
    fn name(&self) -> &'static str;

    /// Serve one accepted connection to completion.
    fn handle(&self, stream: TcpStream, peer: SocketAddr);
}

/// A bound TCP listener dispatching each connection to its own thread.
pub struct Listener {
    listener: TcpListener,
    handler: Arc<dyn ConnectionHandler>,
}

impl Listener {
    pub fn bind(address: &str, handler: Arc<dyn ConnectionHandler>) -> Result<Self> {
        if address.is_empty() {
            return Err(LockError::Config("address should be defined".to_string()));
        }

        let listener = TcpListener::bind(address).map_err(|e| {
            LockError::Config(format!(
                "{} service unable to bind {}: {}",
                handler.name(),
                address,
                e
            ))
        })?;

        Ok(Self { listener, handler })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Run the accept loop on a dedicated thread.
    pub fn spawn(self) -> Result<JoinHandle<()>> {
        let name = self.handler.name();
        info!(service = name, address = %self.local_addr()?, "service has started listening");

        let handle = thread::Builder::new()
            .name(format!("{}-accept", name))
            .spawn(move || self.accept_loop())?;
        Ok(handle)
    }

    fn accept_loop(self) {
        let name = self.handler.name();

        loop {
            let (stream, peer) = match self.listener.accept() {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(service = name, error = %e, "unable to accept connection");
                    continue;
                }
            };

            let handler = Arc::clone(&self.handler);
            let spawned = thread::Builder::new()
                .name(format!("{}-conn", name))
                .spawn(move || handler.handle(stream, peer));
            if let Err(e) = spawned {
                error!(service = name, peer = %peer, error = %e, "unable to spawn connection thread");
            }
        }
    }
}

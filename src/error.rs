//! Error types for lockcenter.
//!
//! Uses thiserror for derive macros. Every variant maps to an exit code so the
//! CLI can report failures consistently.

use crate::exit_codes;
use std::io;
use thiserror::Error;

/// Main error type for lockcenter operations.
#[derive(Error, Debug)]
pub enum LockError {
    /// Transport failure on a connection (connect, read, write).
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// A guarded read or write did not complete before its deadline.
    #[error("operation timed out: {0}")]
    Timeout(io::Error),

    /// The peer sent something the protocol does not allow.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Invalid configuration (bind address, config file, settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// The server answered with a failure status.
    #[error("remote operation failed: {0}")]
    Remote(String),
}

impl LockError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockError::UserError(_) => exit_codes::USER_ERROR,
            LockError::Config(_) => exit_codes::CONFIG_ERROR,
            LockError::Io(_) | LockError::Timeout(_) | LockError::Protocol(_) => {
                exit_codes::CONNECTION_FAILURE
            }
            LockError::Remote(_) => exit_codes::REMOTE_FAILURE,
        }
    }

    /// Whether this error just means the peer closed the connection.
    pub fn is_peer_gone(&self) -> bool {
        matches!(self, LockError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}

impl From<io::Error> for LockError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => LockError::Timeout(err),
            _ => LockError::Io(err),
        }
    }
}

/// Result type alias for lockcenter operations.
pub type Result<T> = std::result::Result<T, LockError>;

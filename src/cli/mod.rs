//! CLI argument parsing for lockcenter.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use lockcenter::config::BIND_ADDRESS_ENV;
use std::path::PathBuf;

/// Lockcenter: named mutexes over TCP.
///
/// `serve` runs the lock server: the mutex port at the bind address and the
/// manager port one above it. The other commands talk to a running server.
#[derive(Parser, Debug)]
#[command(name = "lockcenter")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Manager endpoint used by `keys` and `reset`.
    #[arg(long, global = true, default_value = "localhost:22120")]
    pub manager_address: String,

    /// Mutex endpoint used by `lock` and `unlock`.
    #[arg(long, global = true, default_value = "localhost:22119")]
    pub mutex_address: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for lockcenter.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the lock server.
    ///
    /// Binds the mutex port at the bind address (default port 22119 when
    /// none is given) and the manager port at the next port up.
    Serve(ServeArgs),

    /// List locked keys.
    Keys(KeysArgs),

    /// Reset locked keys and release all their waiters.
    ///
    /// With `-s`, arguments are source addresses; with `-s` and no
    /// arguments, every lock attributed to this machine is released.
    Reset(ResetArgs),

    /// Block until a key is locked, then exit holding it.
    Lock(LockArgs),

    /// Release a key.
    Unlock(UnlockArgs),
}

impl Command {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_directive(&self) -> &'static str {
        match self {
            Command::Serve(_) => "info",
            _ => "warn",
        }
    }
}

/// Arguments for the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Bind address of the mutex port, `host[:port]`.
    #[arg(long, env = BIND_ADDRESS_ENV)]
    pub bind: Option<String>,

    /// Optional YAML config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `keys` command.
#[derive(Parser, Debug)]
pub struct KeysArgs {
    /// Show endpoint, lock time, age and source for each key.
    #[arg(short, long)]
    pub detailed: bool,

    /// Print entries as JSON.
    #[arg(long, conflicts_with = "detailed")]
    pub json: bool,
}

/// Arguments for the `reset` command.
#[derive(Parser, Debug)]
pub struct ResetArgs {
    /// Treat arguments as source addresses instead of keys.
    #[arg(short, long)]
    pub source: bool,

    /// Keys (or source addresses with `-s`) to reset.
    pub targets: Vec<String>,
}

/// Arguments for the `lock` command.
#[derive(Parser, Debug)]
pub struct LockArgs {
    /// Key to lock.
    pub key: String,

    /// Source address to attribute the lock to (defaults to this
    /// connection's address as seen by the server).
    #[arg(long)]
    pub source: Option<String>,
}

/// Arguments for the `unlock` command.
#[derive(Parser, Debug)]
pub struct UnlockArgs {
    /// Key to unlock.
    pub key: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

//! Command implementations for lockcenter.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod keys;
mod lock;
mod reset;
mod serve;

use crate::cli::{Cli, Command};
use lockcenter::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve(args) => serve::cmd_serve(args),
        Command::Keys(args) => keys::cmd_keys(&cli.manager_address, args),
        Command::Reset(args) => reset::cmd_reset(&cli.manager_address, args),
        Command::Lock(args) => lock::cmd_lock(&cli.mutex_address, args),
        Command::Unlock(args) => lock::cmd_unlock(&cli.mutex_address, args),
    }
}

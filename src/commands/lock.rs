//! Implementation of the `lockcenter lock` and `lockcenter unlock` commands.

use crate::cli::{LockArgs, UnlockArgs};
use lockcenter::client::MutexClient;
use lockcenter::error::Result;

/// Block until the key is held, then exit. The lock stays with the server
/// until someone unlocks or resets it.
pub fn cmd_lock(mutex_address: &str, args: LockArgs) -> Result<()> {
    MutexClient::new(mutex_address).lock(&args.key, args.source.as_deref())?;
    println!("locked: {}", args.key);
    Ok(())
}

pub fn cmd_unlock(mutex_address: &str, args: UnlockArgs) -> Result<()> {
    MutexClient::new(mutex_address).unlock(&args.key)?;
    println!("unlocked: {}", args.key);
    Ok(())
}

//! Implementation of the `lockcenter reset` command.

use crate::cli::ResetArgs;
use lockcenter::client::ManagerClient;
use lockcenter::error::{LockError, Result};

/// Reset keys, or source addresses with `-s`, through the manager port.
pub fn cmd_reset(manager_address: &str, args: ResetArgs) -> Result<()> {
    validate_args(&args)?;
    let manager = ManagerClient::new(manager_address);

    if args.source {
        manager.reset_sources(&args.targets)?;
        if args.targets.is_empty() {
            println!("reset: own source address");
        }
    } else {
        manager.reset_keys(&args.targets)?;
    }

    for target in &args.targets {
        println!("reset: {}", target);
    }
    Ok(())
}

fn validate_args(args: &ResetArgs) -> Result<()> {
    if !args.source && args.targets.is_empty() {
        return Err(LockError::UserError(
            "reset command needs key/source addr parameter".to_string(),
        ));
    }
    Ok(())
}

//! Implementation of the `lockcenter keys` command.

use crate::cli::KeysArgs;
use chrono::{DateTime, Utc};
use lockcenter::client::{KeyEntry, ManagerClient};
use lockcenter::error::{LockError, Result};
use std::io::{self, Write};

/// List held keys from the manager port.
pub fn cmd_keys(manager_address: &str, args: KeysArgs) -> Result<()> {
    let entries = ManagerClient::new(manager_address).keys()?;

    let mut stdout = io::stdout().lock();
    render_keys(&entries, &args, Utc::now(), &mut stdout)
}

fn render_keys(
    entries: &[KeyEntry],
    args: &KeysArgs,
    now: DateTime<Utc>,
    out: &mut impl Write,
) -> Result<()> {
    if args.json {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| LockError::UserError(format!("failed to serialize keys: {}", e)))?;
        writeln!(out, "{}", json)?;
        return Ok(());
    }

    for entry in entries {
        if args.detailed {
            writeln!(out, "{}", entry.detailed_line(now))?;
        } else {
            writeln!(out, "{}", entry.key)?;
        }
    }
    Ok(())
}

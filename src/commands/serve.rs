//! Implementation of the `lockcenter serve` command.

use crate::cli::ServeArgs;
use lockcenter::config::ServerConfig;
use lockcenter::error::Result;
use lockcenter::service::Server;
use tracing::info;

/// Load configuration, bind both listeners and serve until the accept loops
/// exit.
pub fn cmd_serve(args: ServeArgs) -> Result<()> {
    info!("------------ starting lockcenter ------------");

    let config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    }
    .with_bind_address(args.bind);

    info!(
        bind_address = %config.primary_address()?,
        manager_address = %config.manager_address()?,
        "resolved listener addresses"
    );

    let server = Server::bind(&config)?;
    server.start()?.wait();
    Ok(())
}

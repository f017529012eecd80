//! Exit code constants for the lockcenter binary.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid key)
//! - 2: Configuration error (bind address, config file)
//! - 3: Connection failure (transport, timeout, protocol)
//! - 4: Remote failure (server replied with a failure status)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid key.
pub const USER_ERROR: i32 = 1;

/// Configuration error: unusable bind address or config file.
pub const CONFIG_ERROR: i32 = 2;

/// Connection failure: connect/read/write error, timeout, or malformed framing.
pub const CONNECTION_FAILURE: i32 = 3;

/// Remote failure: the server answered but reported the operation as failed.
pub const REMOTE_FAILURE: i32 = 4;

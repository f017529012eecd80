//! Configuration constants and default value functions.

/// Port the mutex listener binds when the bind address carries none.
pub const DEFAULT_PORT: u16 = 22119;

/// Environment variable selecting the mutex listener's bind address.
pub const BIND_ADDRESS_ENV: &str = "BIND_ADDRESS";

pub(crate) fn default_port() -> u16 {
    DEFAULT_PORT
}

pub(crate) fn default_base_timeout_secs() -> u64 {
    30
}

/// Roughly a 5 Mbit/s link.
pub(crate) fn default_assumed_throughput() -> u64 {
    625_000
}

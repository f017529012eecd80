//! ServerConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for the lock server.
///
/// Loaded from an optional YAML file; unknown fields are ignored for
/// forward compatibility. The bind address can be overridden afterwards by
/// the `BIND_ADDRESS` environment variable or the `--bind` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address of the mutex listener, `host[:port]`. Empty means all
    /// interfaces on the default port. IPv6 hosts take a port only in
    /// brackets (`[::1]:22119`); a bare `::1` gets the default port.
    pub bind_address: String,

    /// Port appended when `bind_address` has no explicit `:port` suffix.
    #[serde(default = "default_port")]
    pub default_port: u16,

    /// Fixed part of every per-operation socket deadline, in seconds.
    #[serde(default = "default_base_timeout_secs")]
    pub base_timeout_secs: u64,

    /// Throughput (bytes/s) used to stretch deadlines for larger payloads.
    #[serde(default = "default_assumed_throughput")]
    pub assumed_throughput: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: String::new(),
            default_port: default_port(),
            base_timeout_secs: default_base_timeout_secs(),
            assumed_throughput: default_assumed_throughput(),
        }
    }
}

//! Server configuration for lockcenter.
//!
//! Defines the `ServerConfig` struct, optionally loaded from a YAML file,
//! and the derivation of the mutex and manager listener addresses from a
//! single bind address.

mod model;
mod operations;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use model::ServerConfig;
pub use types::{BIND_ADDRESS_ENV, DEFAULT_PORT};

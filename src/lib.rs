//! Lockcenter: a named-mutex coordination service.
//!
//! Remote processes acquire and release exclusive locks identified by an
//! arbitrary string key over a small binary TCP protocol. A second,
//! administrative port lists held keys and force-releases locks by key or
//! by the address of the owning client.

pub mod client;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod locks;
pub mod logging;
pub mod protocol;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

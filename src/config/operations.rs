//! Config loading, validation, and address derivation.

use super::model::ServerConfig;
use crate::error::{LockError, Result};
use crate::protocol::IoPolicy;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static PORT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r":\d{1,5}$").expect("port suffix pattern is valid")
});

impl ServerConfig {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            LockError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml treats an empty document as null rather than an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: ServerConfig = serde_yaml::from_str(yaml)
            .map_err(|e| LockError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// - `base_timeout_secs` must be positive
    /// - `assumed_throughput` must be positive
    pub fn validate(&self) -> Result<()> {
        if self.base_timeout_secs == 0 {
            return Err(LockError::Config(
                "config validation failed: base_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.assumed_throughput == 0 {
            return Err(LockError::Config(
                "config validation failed: assumed_throughput must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Replace the bind address when an override is present.
    pub fn with_bind_address(mut self, bind_address: Option<String>) -> Self {
        if let Some(addr) = bind_address {
            self.bind_address = addr;
        }
        self
    }

    /// Address of the mutex listener with an explicit port.
    pub fn primary_address(&self) -> Result<String> {
        let (host, port) = self.host_and_port()?;
        Ok(format!("{}:{}", host, port))
    }

    /// Address of the manager listener: same host, primary port + 1.
    pub fn manager_address(&self) -> Result<String> {
        let (host, port) = self.host_and_port()?;
        let manager_port = port.checked_add(1).ok_or_else(|| {
            LockError::Config(format!(
                "bind address port is at the edge: {} leaves no room for the manager port",
                port
            ))
        })?;
        Ok(format!("{}:{}", host, manager_port))
    }

    /// Deadline policy for connections served under this config.
    pub fn io_policy(&self) -> IoPolicy {
        IoPolicy::new(
            Duration::from_secs(self.base_timeout_secs),
            self.assumed_throughput,
        )
    }

    fn host_and_port(&self) -> Result<(String, u16)> {
        let addr = self.bind_address.trim();

        // The regex guarantees a ':' followed only by digits. A remaining ':'
        // in the host means a bare IPv6 address with no port.
        let split = PORT_SUFFIX
            .is_match(addr)
            .then(|| addr.rfind(':').unwrap_or(addr.len()))
            .filter(|&idx| is_bracketed_or_plain(&addr[..idx]));

        let (host, port) = if let Some(idx) = split {
            let port = addr[idx + 1..].parse::<u16>().map_err(|e| {
                LockError::Config(format!(
                    "bind address '{}' is in wrong format: {}",
                    self.bind_address, e
                ))
            })?;
            (&addr[..idx], port)
        } else {
            (addr, self.default_port)
        };

        let host = if host.is_empty() {
            "0.0.0.0".to_string()
        } else if is_bracketed_or_plain(host) {
            host.to_string()
        } else {
            format!("[{}]", host)
        };
        Ok((host, port))
    }
}

fn is_bracketed_or_plain(host: &str) -> bool {
    !host.contains(':') || (host.starts_with('[') && host.ends_with(']'))
}

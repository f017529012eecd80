//! Tests for config functionality.

use crate::config::{DEFAULT_PORT, ServerConfig};
use crate::error::LockError;
use std::time::Duration;
use tempfile::TempDir;

fn with_bind(addr: &str) -> ServerConfig {
    ServerConfig::default().with_bind_address(Some(addr.to_string()))
}

#[test]
fn test_default_config() {
    let config = ServerConfig::default();

    assert_eq!(config.bind_address, "");
    assert_eq!(config.default_port, DEFAULT_PORT);
    assert_eq!(config.base_timeout_secs, 30);
    assert_eq!(config.assumed_throughput, 625_000);
}

#[test]
fn test_parse_empty_yaml_uses_defaults() {
    let config = ServerConfig::from_yaml("").unwrap();
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = r#"
bind_address: "10.0.0.5:4000"
base_timeout_secs: 5
"#;
    let config = ServerConfig::from_yaml(yaml).unwrap();

    assert_eq!(config.bind_address, "10.0.0.5:4000");
    assert_eq!(config.base_timeout_secs, 5);
    assert_eq!(config.assumed_throughput, 625_000);
}

#[test]
fn test_unknown_fields_are_ignored() {
    let yaml = r#"
bind_address: "127.0.0.1"
some_future_setting: true
"#;
    let config = ServerConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.bind_address, "127.0.0.1");
}

#[test]
fn test_validate_rejects_zero_throughput() {
    let err = ServerConfig::from_yaml("assumed_throughput: 0").unwrap_err();
    assert!(matches!(err, LockError::Config(_)));
    assert!(err.to_string().contains("assumed_throughput"));
}

#[test]
fn test_validate_rejects_zero_base_timeout() {
    let err = ServerConfig::from_yaml("base_timeout_secs: 0").unwrap_err();
    assert!(err.to_string().contains("base_timeout_secs"));
}

#[test]
fn test_invalid_yaml_is_config_error() {
    let err = ServerConfig::from_yaml("bind_address: [unclosed").unwrap_err();
    assert!(matches!(err, LockError::Config(_)));
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("lockcenter.yaml");
    std::fs::write(&path, "bind_address: \"127.0.0.1:7000\"\n").unwrap();

    let config = ServerConfig::load(&path).unwrap();
    assert_eq!(config.primary_address().unwrap(), "127.0.0.1:7000");
}

#[test]
fn test_load_missing_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ServerConfig::load(temp_dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, LockError::Config(_)));
}

#[test]
fn test_empty_bind_address_listens_everywhere_on_default_port() {
    let config = ServerConfig::default();
    assert_eq!(config.primary_address().unwrap(), "0.0.0.0:22119");
    assert_eq!(config.manager_address().unwrap(), "0.0.0.0:22120");
}

#[test]
fn test_host_without_port_gets_default_port() {
    let config = with_bind("192.168.1.20");
    assert_eq!(config.primary_address().unwrap(), "192.168.1.20:22119");
    assert_eq!(config.manager_address().unwrap(), "192.168.1.20:22120");
}

#[test]
fn test_port_only_bind_address() {
    let config = with_bind(":9000");
    assert_eq!(config.primary_address().unwrap(), "0.0.0.0:9000");
    assert_eq!(config.manager_address().unwrap(), "0.0.0.0:9001");
}

#[test]
fn test_bare_ipv6_host_gets_default_port() {
    let config = with_bind("::1");
    assert_eq!(config.primary_address().unwrap(), "[::1]:22119");
    assert_eq!(config.manager_address().unwrap(), "[::1]:22120");

    assert_eq!(with_bind("::").primary_address().unwrap(), "[::]:22119");
}

#[test]
fn test_bracketed_ipv6_with_port() {
    let config = with_bind("[::1]:7000");
    assert_eq!(config.primary_address().unwrap(), "[::1]:7000");
    assert_eq!(config.manager_address().unwrap(), "[::1]:7001");

    assert_eq!(with_bind("[::1]").primary_address().unwrap(), "[::1]:22119");
}

#[test]
fn test_manager_port_at_the_edge_is_rejected() {
    let config = with_bind("127.0.0.1:65535");
    assert!(config.primary_address().is_ok());

    let err = config.manager_address().unwrap_err();
    assert!(err.to_string().contains("at the edge"));
}

#[test]
fn test_out_of_range_port_is_rejected() {
    let err = with_bind("127.0.0.1:99999").primary_address().unwrap_err();
    assert!(matches!(err, LockError::Config(_)));
}

#[test]
fn test_bind_override_only_applies_when_present() {
    let config = with_bind("127.0.0.1:7000").with_bind_address(None);
    assert_eq!(config.bind_address, "127.0.0.1:7000");
}

#[test]
fn test_io_policy_uses_configured_values() {
    let yaml = "base_timeout_secs: 2\nassumed_throughput: 100\n";
    let policy = ServerConfig::from_yaml(yaml).unwrap().io_policy();

    assert_eq!(policy.deadline_for(0), Duration::from_secs(2));
    assert_eq!(policy.deadline_for(250), Duration::from_secs(4));
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema.
//!
//! One TOML document configures a bus node: which shell model it hosts,
//! which bindings it serves, and how it announces itself to a registry.
//!
//! ```toml
//! [node]
//! id_short = "robot-cell-4"
//! model_path = "models/robot.json"
//!
//! [http]
//! host = "0.0.0.0"
//! port = 8081
//!
//! [tcp]
//! enabled = true
//! port = 6998
//!
//! [registry]
//! serve = true
//! announce_endpoint = "http://registry.plant.local:8081"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// VabConfig
// =============================================================================

/// Root configuration of one bus node.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct VabConfig {
    /// Node identity and model content.
    #[serde(default)]
    pub node: NodeConfig,

    /// HTTP binding settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// TCP binding settings.
    #[serde(default)]
    pub tcp: TcpConfig,

    /// Registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,
}

impl VabConfig {
    /// Validates cross-field invariants.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.http.port == 0 {
            return Err(ConfigError::validation("http.port", "must not be zero"));
        }
        if self.tcp.enabled {
            if self.tcp.port == 0 {
                return Err(ConfigError::validation("tcp.port", "must not be zero"));
            }
            if self.tcp.port == self.http.port && self.tcp.host == self.http.host {
                return Err(ConfigError::validation(
                    "tcp.port",
                    "must differ from the http binding address",
                ));
            }
        }
        if let Some(endpoint) = &self.registry.announce_endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::validation(
                    "registry.announce_endpoint",
                    "must be an http(s) url",
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Node identity and model content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    /// Short name of the hosted shell.
    #[serde(default = "default_id_short")]
    pub id_short: String,

    /// JSON model document to load at startup; empty shell when absent.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            id_short: default_id_short(),
            model_path: None,
        }
    }
}

/// HTTP binding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_http_port")]
    pub port: u16,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl HttpConfig {
    /// Returns the bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_http_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// TCP binding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TcpConfig {
    /// Whether the TCP binding is served.
    #[serde(default)]
    pub enabled: bool,

    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_tcp_port")]
    pub port: u16,
}

impl TcpConfig {
    /// Returns the bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: default_host(),
            port: default_tcp_port(),
        }
    }
}

/// Registry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Whether this node serves the `/registry` surface itself.
    #[serde(default = "default_true")]
    pub serve: bool,

    /// Remote registry to announce this node's descriptor to.
    #[serde(default)]
    pub announce_endpoint: Option<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            serve: true,
            announce_endpoint: None,
        }
    }
}

fn default_id_short() -> String {
    "vab-node".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_http_port() -> u16 {
    8081
}

fn default_tcp_port() -> u16 {
    6998
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = VabConfig::default();
        assert_eq!(config.http.port, 8081);
        assert_eq!(config.tcp.port, 6998);
        assert!(!config.tcp.enabled);
        assert!(config.registry.serve);
        config.validate().unwrap();
    }

    #[test]
    fn test_port_collision_is_rejected() {
        let mut config = VabConfig::default();
        config.tcp.enabled = true;
        config.tcp.port = config.http.port;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_is_rejected() {
        let mut config = VabConfig::default();
        config.http.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_announce_endpoint_must_be_http() {
        let mut config = VabConfig::default();
        config.registry.announce_endpoint = Some("tcp://somewhere".to_string());
        assert!(config.validate().is_err());

        config.registry.announce_endpoint = Some("http://registry:8081".to_string());
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: VabConfig = toml::from_str(
            r#"
            [node]
            id_short = "demo"

            [tcp]
            enabled = true
            "#,
        )
        .unwrap();
        assert_eq!(config.node.id_short, "demo");
        assert_eq!(config.http.port, 8081);
        assert!(config.tcp.enabled);
    }
}

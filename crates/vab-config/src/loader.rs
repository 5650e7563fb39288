// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading.
//!
//! Loading pipeline:
//!
//! 1. Read and parse the TOML file
//! 2. Apply environment variable overrides (`VAB_` prefix)
//! 3. Validate
//! 4. Check that a configured model file exists
//!
//! # Environment Variable Override
//!
//! ```text
//! VAB_HTTP_HOST=0.0.0.0
//! VAB_HTTP_PORT=9090
//! VAB_TCP_ENABLED=true
//! VAB_TCP_PORT=7000
//! VAB_NODE_ID_SHORT=line-4
//! VAB_NODE_MODEL_PATH=/etc/vab/model.json
//! VAB_REGISTRY_ANNOUNCE_ENDPOINT=http://registry:8081
//! ```

use std::env;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::VabConfig;

// =============================================================================
// ConfigLoader
// =============================================================================

/// Loads, overrides and validates a node configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a loader with the default `VAB` environment prefix.
    pub fn new() -> Self {
        Self {
            env_prefix: "VAB".to_string(),
        }
    }

    /// Sets the environment variable prefix.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Loads a configuration file.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<VabConfig> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let mut config = self.parse(path, &raw)?;

        self.apply_env_overrides(&mut config)?;
        config.validate()?;

        if let Some(model_path) = &config.node.model_path {
            if !model_path.exists() {
                return Err(ConfigError::validation(
                    "node.model_path",
                    format!("model file '{}' does not exist", model_path.display()),
                ));
            }
        }

        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn parse(&self, path: &Path, raw: &str) -> ConfigResult<VabConfig> {
        toml::from_str(raw).map_err(|e| ConfigError::parse(path, e.to_string()))
    }

    fn env(&self, key: &str) -> Option<String> {
        env::var(format!("{}_{key}", self.env_prefix)).ok()
    }

    fn apply_env_overrides(&self, config: &mut VabConfig) -> ConfigResult<()> {
        if let Some(host) = self.env("HTTP_HOST") {
            debug!(%host, "overriding http.host from environment");
            config.http.host = host;
        }
        if let Some(port) = self.env("HTTP_PORT") {
            config.http.port = parse_field("http.port", &port)?;
        }
        if let Some(enabled) = self.env("TCP_ENABLED") {
            config.tcp.enabled = parse_field("tcp.enabled", &enabled)?;
        }
        if let Some(host) = self.env("TCP_HOST") {
            config.tcp.host = host;
        }
        if let Some(port) = self.env("TCP_PORT") {
            config.tcp.port = parse_field("tcp.port", &port)?;
        }
        if let Some(id_short) = self.env("NODE_ID_SHORT") {
            config.node.id_short = id_short;
        }
        if let Some(model_path) = self.env("NODE_MODEL_PATH") {
            config.node.model_path = Some(model_path.into());
        }
        if let Some(endpoint) = self.env("REGISTRY_ANNOUNCE_ENDPOINT") {
            config.registry.announce_endpoint = Some(endpoint);
        }
        if let Some(serve) = self.env("REGISTRY_SERVE") {
            config.registry.serve = parse_field("registry.serve", &serve)?;
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, raw: &str) -> ConfigResult<T> {
    raw.parse()
        .map_err(|_| ConfigError::validation(field, format!("cannot parse '{raw}'")))
}

// =============================================================================
// Tests
// =============================================================================

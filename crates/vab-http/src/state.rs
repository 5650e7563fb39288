// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Shared handler state.

use std::sync::Arc;

use vab_core::provider::ModelProvider;
use vab_registry::registry::TaggedDirectory;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// AppState
// =============================================================================

/// State shared by all HTTP handlers of one node.
#[derive(Clone)]
pub struct AppState {
    /// The provider answering the shell namespace.
    pub provider: Arc<dyn ModelProvider>,
    /// The registry served under `/registry`, when this node hosts one.
    registry: Option<Arc<dyn TaggedDirectory>>,
}

impl AppState {
    /// Creates state for a node serving only the shell surface.
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            registry: None,
        }
    }

    /// Attaches a registry to also serve the `/registry` surface.
    pub fn with_registry(mut self, registry: Arc<dyn TaggedDirectory>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Returns the registry, or a service-unavailable error.
    pub fn registry(&self) -> ApiResult<Arc<dyn TaggedDirectory>> {
        self.registry
            .clone()
            .ok_or_else(|| ApiError::service_unavailable("this node does not serve a registry"))
    }

    /// Returns `true` if this node serves a registry.
    pub fn has_registry(&self) -> bool {
        self.registry.is_some()
    }
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Remote element proxy.
//!
//! A proxy pairs a transport connector with a base path and exposes the
//! same provider contract as the remote tree, resolved relative to that
//! base. Proxies are stateless beyond those two fields and freely shared;
//! [`ElementProxy::deep_proxy`] scopes a new proxy to a child path without
//! another registry round trip — a retrieved shell hands out sub-proxies
//! for each of its sub-models this way.
//!
//! Proxies hold no cache, with one narrow exception: metadata immutable
//! after creation. [`ElementProxy::connect`] performs a single full read of
//! the base element and caches its `idShort`; the cache is never refreshed.

use std::sync::Arc;

use async_trait::async_trait;

use vab_core::error::ProviderResult;
use vab_core::path;
use vab_core::provider::ModelProvider;
use vab_core::Value;

/// Map key of the cached short identifier.
const ID_SHORT_KEY: &str = "idShort";

// =============================================================================
// ElementProxy
// =============================================================================

/// Client-side stand-in for one remote model tree element.
#[derive(Clone)]
pub struct ElementProxy {
    connector: Arc<dyn ModelProvider>,
    base: String,
    id_short: Option<String>,
}

impl ElementProxy {
    /// Creates a proxy without touching the remote element.
    pub fn new(connector: Arc<dyn ModelProvider>, base: impl AsRef<str>) -> Self {
        Self {
            connector,
            base: path::strip_slashes(base.as_ref()),
            id_short: None,
        }
    }

    /// Creates a proxy and caches the element's `idShort` from one initial
    /// full read.
    pub async fn connect(
        connector: Arc<dyn ModelProvider>,
        base: impl AsRef<str>,
    ) -> ProviderResult<Self> {
        let mut proxy = Self::new(connector, base);
        let root = proxy.connector.read(&proxy.base).await?;
        proxy.id_short = root
            .as_map()
            .and_then(|map| map.get(ID_SHORT_KEY))
            .and_then(Value::as_str)
            .map(String::from);
        Ok(proxy)
    }

    /// Returns the base path of this proxy.
    pub fn base_path(&self) -> &str {
        &self.base
    }

    /// Returns the cached short identifier, if this proxy was connected.
    pub fn id_short(&self) -> Option<&str> {
        self.id_short.as_deref()
    }

    /// Returns a new proxy scoped to a child path of this one.
    pub fn deep_proxy(&self, child_path: impl AsRef<str>) -> Self {
        Self {
            connector: self.connector.clone(),
            base: path::concat([self.base.as_str(), child_path.as_ref()]),
            id_short: None,
        }
    }

    fn resolve(&self, rel: &str) -> String {
        path::concat([self.base.as_str(), rel])
    }
}

#[async_trait]
impl ModelProvider for ElementProxy {
    async fn read(&self, rel: &str) -> ProviderResult<Value> {
        self.connector.read(&self.resolve(rel)).await
    }

    async fn write(&self, rel: &str, value: Value) -> ProviderResult<()> {
        self.connector.write(&self.resolve(rel), value).await
    }

    async fn create(&self, rel: &str, value: Value) -> ProviderResult<()> {
        self.connector.create(&self.resolve(rel), value).await
    }

    async fn delete(&self, rel: &str) -> ProviderResult<()> {
        self.connector.delete(&self.resolve(rel)).await
    }

    async fn delete_matching(&self, rel: &str, value: Value) -> ProviderResult<()> {
        self.connector.delete_matching(&self.resolve(rel), value).await
    }

    async fn invoke(&self, rel: &str, args: Vec<Value>) -> ProviderResult<Value> {
        self.connector.invoke(&self.resolve(rel), args).await
    }
}

// =============================================================================
// Tests
// =============================================================================

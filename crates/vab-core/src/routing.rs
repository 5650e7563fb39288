// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Multi-submodel routing provider.
//!
//! One network endpoint serves a shell together with an arbitrary,
//! dynamically changing set of sub-models under a single namespace:
//!
//! ```text
//! /shell                      the shell's own tree
//! /shell/submodels            every registered sub-model's content
//! /shell/submodels/{id}/...   delegated into one sub-model
//! /shell/...                  delegated into the shell tree
//! ```
//!
//! The router strips the routing segments and delegates the remaining path;
//! errors from the delegate propagate unchanged. Sub-models are registered
//! administratively via [`MultiSubmodelProvider::add_submodel`] — the data
//! path cannot create them.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::warn;

use crate::error::{ProviderError, ProviderResult};
use crate::path;
use crate::provider::ModelProvider;
use crate::value::Value;

/// First routing segment: the shell namespace.
pub const SHELL_SEGMENT: &str = "shell";

/// Second routing segment: the sub-model collection.
pub const SUBMODELS_SEGMENT: &str = "submodels";

// =============================================================================
// MultiSubmodelProvider
// =============================================================================

/// Aggregates one shell provider and N sub-model providers.
pub struct MultiSubmodelProvider {
    shell: RwLock<Option<Arc<dyn ModelProvider>>>,
    submodels: DashMap<String, Arc<dyn ModelProvider>>,
}

/// Where a path routes to, after stripping the routing segments.
enum Route {
    /// Into the shell's own tree.
    Shell(Arc<dyn ModelProvider>, String),
    /// Into one registered sub-model.
    Submodel(Arc<dyn ModelProvider>, String),
    /// The whole sub-model collection (`/shell/submodels`).
    Collection,
}

impl MultiSubmodelProvider {
    /// Creates an empty routing provider.
    pub fn new() -> Self {
        Self {
            shell: RwLock::new(None),
            submodels: DashMap::new(),
        }
    }

    /// Creates a routing provider with a shell already attached.
    pub fn with_shell(shell: Arc<dyn ModelProvider>) -> Self {
        let provider = Self::new();
        provider.set_shell(shell);
        provider
    }

    /// Attaches (or replaces) the shell provider.
    pub fn set_shell(&self, shell: Arc<dyn ModelProvider>) {
        *self.shell.write() = Some(shell);
    }

    /// Registers a sub-model provider under an identifier, replacing any
    /// previous provider with the same identifier.
    pub fn add_submodel(&self, id: impl Into<String>, provider: Arc<dyn ModelProvider>) {
        let id = id.into();
        tracing::debug!(submodel = %id, "registered submodel provider");
        self.submodels.insert(id, provider);
    }

    /// Removes a sub-model provider, returning it if it was registered.
    pub fn remove_submodel(&self, id: &str) -> Option<Arc<dyn ModelProvider>> {
        self.submodels.remove(id).map(|(_, provider)| provider)
    }

    /// Returns the identifiers of all registered sub-models.
    pub fn submodel_ids(&self) -> Vec<String> {
        self.submodels.iter().map(|e| e.key().clone()).collect()
    }

    /// Returns `true` if a sub-model is registered under `id`.
    pub fn contains_submodel(&self, id: &str) -> bool {
        self.submodels.contains_key(id)
    }

    fn shell_provider(&self) -> ProviderResult<Arc<dyn ModelProvider>> {
        self.shell
            .read()
            .clone()
            .ok_or_else(|| ProviderError::not_found("no shell is attached".to_string()))
    }

    fn submodel_provider(&self, id: &str) -> ProviderResult<Arc<dyn ModelProvider>> {
        self.submodels
            .get(id)
            .map(|e| e.value().clone())
            .ok_or_else(|| ProviderError::not_found(format!("submodel '{id}' is not registered")))
    }

    fn route(&self, raw_path: &str) -> ProviderResult<Route> {
        let segments = path::split(raw_path);
        if segments.first() != Some(&SHELL_SEGMENT) {
            return Err(ProviderError::not_found(format!(
                "path '{raw_path}' is outside the /{SHELL_SEGMENT} namespace"
            )));
        }
        match segments.get(1) {
            None => Ok(Route::Shell(self.shell_provider()?, String::new())),
            Some(&seg) if seg == SUBMODELS_SEGMENT => match segments.get(2) {
                None => Ok(Route::Collection),
                Some(id) => Ok(Route::Submodel(
                    self.submodel_provider(id)?,
                    path::join(&segments[3..]),
                )),
            },
            Some(_) => Ok(Route::Shell(
                self.shell_provider()?,
                path::join(&segments[1..]),
            )),
        }
    }

    /// Reads every registered sub-model's content.
    ///
    /// Collect-and-continue: a failing sub-model is logged and skipped, it
    /// never prevents returning the others. Ordering is unspecified — the
    /// result is a set.
    async fn read_all_submodels(&self) -> ProviderResult<Value> {
        let providers: Vec<(String, Arc<dyn ModelProvider>)> = self
            .submodels
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();

        let mut contents = Vec::with_capacity(providers.len());
        for (id, provider) in providers {
            match provider.read("").await {
                Ok(value) => contents.push(value),
                Err(error) => {
                    warn!(submodel = %id, %error, "skipping submodel during fan-out read");
                }
            }
        }
        Ok(Value::Array(contents))
    }
}

impl Default for MultiSubmodelProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn collection_is_administrative() -> ProviderError {
    ProviderError::malformed(format!(
        "/{SHELL_SEGMENT}/{SUBMODELS_SEGMENT} is managed administratively"
    ))
}

#[async_trait]
impl ModelProvider for MultiSubmodelProvider {
    async fn read(&self, path: &str) -> ProviderResult<Value> {
        match self.route(path)? {
            Route::Shell(provider, rest) => provider.read(&rest).await,
            Route::Submodel(provider, rest) => provider.read(&rest).await,
            Route::Collection => self.read_all_submodels().await,
        }
    }

    async fn write(&self, path: &str, value: Value) -> ProviderResult<()> {
        match self.route(path)? {
            Route::Shell(provider, rest) => provider.write(&rest, value).await,
            Route::Submodel(provider, rest) => provider.write(&rest, value).await,
            Route::Collection => Err(collection_is_administrative()),
        }
    }

    async fn create(&self, path: &str, value: Value) -> ProviderResult<()> {
        match self.route(path)? {
            Route::Shell(provider, rest) => provider.create(&rest, value).await,
            Route::Submodel(provider, rest) => provider.create(&rest, value).await,
            // New sub-models are registered via `add_submodel`, not the data path.
            Route::Collection => Err(collection_is_administrative()),
        }
    }

    async fn delete(&self, path: &str) -> ProviderResult<()> {
        match self.route(path)? {
            Route::Shell(provider, rest) => provider.delete(&rest).await,
            Route::Submodel(provider, rest) => provider.delete(&rest).await,
            Route::Collection => Err(collection_is_administrative()),
        }
    }

    async fn delete_matching(&self, path: &str, value: Value) -> ProviderResult<()> {
        match self.route(path)? {
            Route::Shell(provider, rest) => provider.delete_matching(&rest, value).await,
            Route::Submodel(provider, rest) => provider.delete_matching(&rest, value).await,
            Route::Collection => Err(collection_is_administrative()),
        }
    }

    async fn invoke(&self, path: &str, args: Vec<Value>) -> ProviderResult<Value> {
        match self.route(path)? {
            Route::Shell(provider, rest) => provider.invoke(&rest, args).await,
            Route::Submodel(provider, rest) => provider.invoke(&rest, args).await,
            Route::Collection => Err(collection_is_administrative()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MapProvider;
    use crate::value_map;

    fn routing() -> MultiSubmodelProvider {
        let shell = MapProvider::from_map(value_map! { "idShort" => "aasIdShort" });
        let sm1 = MapProvider::from_map(value_map! {
            "idShort" => "sm1",
            "temp" => value_map! { "value" => 21.5f64 },
        });
        let router = MultiSubmodelProvider::with_shell(Arc::new(shell));
        router.add_submodel("sm1", Arc::new(sm1));
        router
    }

    #[tokio::test]
    async fn test_shell_root_and_subpath() {
        let r = routing();
        let shell = r.read("/shell").await.unwrap();
        assert_eq!(
            shell.as_map().unwrap().get("idShort"),
            Some(&Value::Str("aasIdShort".into()))
        );
        assert_eq!(
            r.read("/shell/idShort").await.unwrap(),
            Value::Str("aasIdShort".into())
        );
    }

    #[tokio::test]
    async fn test_delegation_matches_direct_access() {
        let r = routing();
        // Adding an unrelated submodel must not change sm1's answers.
        r.add_submodel(
            "other",
            Arc::new(MapProvider::from_map(value_map! { "x" => 1i64 })),
        );
        assert_eq!(
            r.read("/shell/submodels/sm1/temp/value").await.unwrap(),
            Value::Float(21.5)
        );
    }

    #[tokio::test]
    async fn test_concrete_scenario() {
        let r = routing();
        assert_eq!(
            r.read("/shell/submodels/sm1/temp/value").await.unwrap(),
            Value::Float(21.5)
        );

        r.write("/shell/submodels/sm1/temp/value", Value::Float(22.0))
            .await
            .unwrap();
        assert_eq!(
            r.read("/shell/submodels/sm1/temp/value").await.unwrap(),
            Value::Float(22.0)
        );

        r.delete("/shell/submodels/sm1/temp").await.unwrap();
        assert!(r
            .read("/shell/submodels/sm1/temp/value")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_fanout_read_collects_all_submodels() {
        let r = routing();
        r.add_submodel(
            "sm2",
            Arc::new(MapProvider::from_map(value_map! { "idShort" => "sm2" })),
        );

        let all = r.read("/shell/submodels").await.unwrap();
        let ids: Vec<&str> = all
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_map()?.get("idShort")?.as_str())
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"sm1") && ids.contains(&"sm2"));
    }

    #[tokio::test]
    async fn test_fanout_skips_failing_submodel() {
        let r = routing();
        // A provider with no root fails its read; the fan-out must still
        // return the healthy submodel.
        r.add_submodel(
            "broken",
            Arc::new(MapProvider::empty(crate::element::CompositeHandler::new())),
        );

        let all = r.read("/shell/submodels").await.unwrap();
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_submodel_is_not_found() {
        let r = routing();
        assert!(r
            .read("/shell/submodels/nope/temp")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(r
            .write("/shell/submodels/nope/temp", Value::Null)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_collection_create_is_rejected() {
        let r = routing();
        let err = r
            .create("/shell/submodels", value_map! {})
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "malformed_request");
    }

    #[tokio::test]
    async fn test_outside_namespace_is_not_found() {
        let r = routing();
        assert!(r.read("/other").await.unwrap_err().is_not_found());
        assert!(r.read("").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_remove_submodel() {
        let r = routing();
        assert!(r.remove_submodel("sm1").is_some());
        assert!(r
            .read("/shell/submodels/sm1")
            .await
            .unwrap_err()
            .is_not_found());
        assert!(r.remove_submodel("sm1").is_none());
    }
}

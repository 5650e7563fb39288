// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Model document loading.
//!
//! A node's served content comes from one JSON document:
//!
//! ```json
//! {
//!   "idShort": "robot-cell-4",
//!   "identification": { "id": "urn:plant:robot-cell-4", "idKind": "iri" },
//!   "shell": { "assetKind": "instance" },
//!   "submodels": {
//!     "telemetry": { "idShort": "telemetry", "temp": { "value": 21.5 } }
//!   }
//! }
//! ```
//!
//! The document becomes a routing provider (shell tree + one map provider
//! per sub-model) and a shell descriptor for registry announcement.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

use vab_core::provider::MapProvider;
use vab_core::routing::{MultiSubmodelProvider, SHELL_SEGMENT, SUBMODELS_SEGMENT};
use vab_core::Value;
use vab_registry::descriptor::{
    Endpoint, Identifier, ShellDescriptor, SubmodelDescriptor,
};

use crate::error::{BinError, BinResult};

/// Map key of the shell's short name inside a model tree.
const ID_SHORT_KEY: &str = "idShort";

// =============================================================================
// ModelDocument
// =============================================================================

/// Parsed model document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelDocument {
    /// Short name of the shell; overrides the configured one when present.
    #[serde(default)]
    pub id_short: Option<String>,

    /// Stable identifier for registry announcement.
    #[serde(default)]
    pub identification: Option<Identifier>,

    /// The shell's own tree.
    #[serde(default)]
    pub shell: Option<Value>,

    /// Sub-model trees keyed by identifier.
    #[serde(default)]
    pub submodels: IndexMap<String, Value>,
}

impl ModelDocument {
    /// Loads a model document from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> BinResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| BinError::model(format!("invalid model file '{}': {e}", path.display())))
    }

    /// Creates an empty document for a node without a model file.
    pub fn empty() -> Self {
        Self {
            id_short: None,
            identification: None,
            shell: None,
            submodels: IndexMap::new(),
        }
    }

    /// Returns the effective shell short name.
    pub fn effective_id_short(&self, configured: &str) -> String {
        self.id_short.clone().unwrap_or_else(|| configured.to_string())
    }

    /// Builds the routing provider serving this document.
    pub fn build_provider(&self, configured_id_short: &str) -> BinResult<MultiSubmodelProvider> {
        let id_short = self.effective_id_short(configured_id_short);

        let mut shell_tree = match self.shell.clone() {
            Some(Value::Map(map)) => map,
            Some(other) => {
                return Err(BinError::model(format!(
                    "shell tree must be a mapping, got {}",
                    other.type_name()
                )))
            }
            None => IndexMap::new(),
        };
        shell_tree
            .entry(ID_SHORT_KEY.to_string())
            .or_insert_with(|| Value::Str(id_short.clone()));

        let router =
            MultiSubmodelProvider::with_shell(Arc::new(MapProvider::from_map(Value::Map(shell_tree))));

        for (id, tree) in &self.submodels {
            match tree {
                Value::Map(_) => {
                    router.add_submodel(id.clone(), Arc::new(MapProvider::from_map(tree.clone())));
                }
                other => {
                    return Err(BinError::model(format!(
                        "submodel '{id}' must be a mapping, got {}",
                        other.type_name()
                    )))
                }
            }
        }
        Ok(router)
    }

    /// Builds the shell descriptor announced to a registry.
    pub fn descriptor(&self, configured_id_short: &str, http_base: &str) -> ShellDescriptor {
        let id_short = self.effective_id_short(configured_id_short);
        let identification = self
            .identification
            .clone()
            .unwrap_or_else(|| Identifier::custom(format!("urn:vab:{id_short}")));

        let base = http_base.trim_end_matches('/');
        let mut descriptor = ShellDescriptor::new(&id_short, identification)
            .with_endpoint(Endpoint::http(format!("{base}/{SHELL_SEGMENT}")));

        for id in self.submodels.keys() {
            descriptor.add_submodel_descriptor(
                SubmodelDescriptor::new(
                    id,
                    Identifier::custom(format!("urn:vab:{id_short}:{id}")),
                )
                .with_endpoint(Endpoint::http(format!(
                    "{base}/{SHELL_SEGMENT}/{SUBMODELS_SEGMENT}/{id}"
                ))),
            );
        }
        descriptor
    }
}

// =============================================================================
// Tests
// =============================================================================

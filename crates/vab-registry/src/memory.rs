// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! In-memory registry.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::descriptor::{ShellDescriptor, SubmodelDescriptor};
use crate::error::{RegistryError, RegistryResult};
use crate::registry::Registry;

// =============================================================================
// MapRegistry
// =============================================================================

/// Map-backed registry.
///
/// One `RwLock` per instance serializes writers and lets lookups run
/// concurrently; each register/delete is atomic with respect to readers.
pub struct MapRegistry {
    descriptors: RwLock<HashMap<String, ShellDescriptor>>,
}

impl MapRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            descriptors: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of registered descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.read().len()
    }

    /// Returns `true` if no descriptors are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.read().is_empty()
    }
}

impl Default for MapRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registry for MapRegistry {
    async fn register(&self, descriptor: ShellDescriptor) -> RegistryResult<()> {
        let id = descriptor.id().to_string();
        let mut map = self.descriptors.write();
        map.remove(&id);
        map.insert(id.clone(), descriptor);
        debug!(%id, "registered descriptor");
        Ok(())
    }

    async fn register_only(&self, descriptor: ShellDescriptor) -> RegistryResult<()> {
        let id = descriptor.id().to_string();
        self.descriptors.write().insert(id.clone(), descriptor);
        debug!(%id, "registered descriptor");
        Ok(())
    }

    async fn lookup(&self, id: &str) -> RegistryResult<ShellDescriptor> {
        self.descriptors
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(id))
    }

    async fn lookup_all(&self) -> RegistryResult<Vec<ShellDescriptor>> {
        Ok(self.descriptors.read().values().cloned().collect())
    }

    async fn delete(&self, id: &str) -> RegistryResult<()> {
        self.descriptors
            .write()
            .remove(id)
            .map(|_| debug!(%id, "removed descriptor"))
            .ok_or_else(|| RegistryError::not_found(id))
    }

    async fn register_submodel(
        &self,
        shell_id: &str,
        descriptor: SubmodelDescriptor,
    ) -> RegistryResult<()> {
        let mut map = self.descriptors.write();
        let shell = map
            .get_mut(shell_id)
            .ok_or_else(|| RegistryError::not_found(shell_id))?;
        debug!(%shell_id, submodel = %descriptor.id_short, "attached submodel descriptor");
        shell.add_submodel_descriptor(descriptor);
        Ok(())
    }

    async fn delete_submodel(&self, shell_id: &str, id_short: &str) -> RegistryResult<()> {
        let mut map = self.descriptors.write();
        let shell = map
            .get_mut(shell_id)
            .ok_or_else(|| RegistryError::not_found(shell_id))?;
        if !shell.remove_submodel_descriptor(id_short) {
            return Err(RegistryError::not_found(format!("{shell_id}/{id_short}")));
        }
        debug!(%shell_id, submodel = %id_short, "detached submodel descriptor");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

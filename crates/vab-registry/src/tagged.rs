// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Tag-indexed in-memory directory.
//!
//! Extends the map registry with a secondary `tag → identifiers` index. The
//! index is derived state: it is only ever mutated inside the same write
//! lock as the primary map, so concurrent registrations with an overlapping
//! new tag cannot lose a descriptor, and a lookup can never observe a tag
//! bucket pointing at a missing or stale entry.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::descriptor::{ShellDescriptor, SubmodelDescriptor};
use crate::error::{RegistryError, RegistryResult};
use crate::registry::{Registry, TaggedDirectory};

// =============================================================================
// MapTaggedDirectory
// =============================================================================

#[derive(Default)]
struct DirectoryState {
    descriptors: HashMap<String, ShellDescriptor>,
    // Buckets hold identifiers, not descriptor copies: lookups resolve
    // through the primary map, so replace-wholesale registration can never
    // leave an old descriptor reachable via a tag.
    tags: HashMap<String, HashSet<String>>,
}

impl DirectoryState {
    fn add_tags(&mut self, descriptor: &ShellDescriptor) {
        for tag in &descriptor.tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .insert(descriptor.id().to_string());
        }
    }

    fn clear_tags(&mut self, descriptor: &ShellDescriptor) {
        for tag in &descriptor.tags {
            if let Some(bucket) = self.tags.get_mut(tag) {
                bucket.remove(descriptor.id());
                if bucket.is_empty() {
                    self.tags.remove(tag);
                }
            }
        }
    }

    fn resolve(&self, ids: &HashSet<String>) -> Vec<ShellDescriptor> {
        ids.iter()
            .filter_map(|id| self.descriptors.get(id).cloned())
            .collect()
    }

    fn ids_for_tag(&self, tag: &str) -> HashSet<String> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }
}

/// Map-backed registry with a tag index.
pub struct MapTaggedDirectory {
    state: RwLock<DirectoryState>,
}

impl MapTaggedDirectory {
    /// Creates an empty tagged directory.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DirectoryState::default()),
        }
    }
}

impl Default for MapTaggedDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Registry for MapTaggedDirectory {
    async fn register(&self, descriptor: ShellDescriptor) -> RegistryResult<()> {
        let id = descriptor.id().to_string();
        let mut state = self.state.write();
        if let Some(previous) = state.descriptors.remove(&id) {
            state.clear_tags(&previous);
        }
        state.add_tags(&descriptor);
        state.descriptors.insert(id.clone(), descriptor);
        debug!(%id, "registered descriptor");
        Ok(())
    }

    async fn register_only(&self, descriptor: ShellDescriptor) -> RegistryResult<()> {
        let id = descriptor.id().to_string();
        let mut state = self.state.write();
        state.add_tags(&descriptor);
        state.descriptors.insert(id.clone(), descriptor);
        debug!(%id, "registered descriptor");
        Ok(())
    }

    async fn lookup(&self, id: &str) -> RegistryResult<ShellDescriptor> {
        self.state
            .read()
            .descriptors
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::not_found(id))
    }

    async fn lookup_all(&self) -> RegistryResult<Vec<ShellDescriptor>> {
        Ok(self.state.read().descriptors.values().cloned().collect())
    }

    async fn delete(&self, id: &str) -> RegistryResult<()> {
        let mut state = self.state.write();
        let descriptor = state
            .descriptors
            .remove(id)
            .ok_or_else(|| RegistryError::not_found(id))?;
        state.clear_tags(&descriptor);
        debug!(%id, "removed descriptor");
        Ok(())
    }

    async fn register_submodel(
        &self,
        shell_id: &str,
        descriptor: SubmodelDescriptor,
    ) -> RegistryResult<()> {
        let mut state = self.state.write();
        let shell = state
            .descriptors
            .get_mut(shell_id)
            .ok_or_else(|| RegistryError::not_found(shell_id))?;
        shell.add_submodel_descriptor(descriptor);
        Ok(())
    }

    async fn delete_submodel(&self, shell_id: &str, id_short: &str) -> RegistryResult<()> {
        let mut state = self.state.write();
        let shell = state
            .descriptors
            .get_mut(shell_id)
            .ok_or_else(|| RegistryError::not_found(shell_id))?;
        if !shell.remove_submodel_descriptor(id_short) {
            return Err(RegistryError::not_found(format!("{shell_id}/{id_short}")));
        }
        Ok(())
    }
}

#[async_trait]
impl TaggedDirectory for MapTaggedDirectory {
    async fn lookup_by_tag(&self, tag: &str) -> RegistryResult<Vec<ShellDescriptor>> {
        let state = self.state.read();
        let ids = state.ids_for_tag(tag);
        Ok(state.resolve(&ids))
    }

    async fn lookup_by_tags(&self, tags: &[String]) -> RegistryResult<Vec<ShellDescriptor>> {
        let state = self.state.read();
        let mut tags_iter = tags.iter();
        let mut ids = match tags_iter.next() {
            Some(tag) => state.ids_for_tag(tag),
            // Empty tag set means empty result, not "all".
            None => return Ok(Vec::new()),
        };
        for tag in tags_iter {
            let bucket = state.ids_for_tag(tag);
            ids.retain(|id| bucket.contains(id));
        }
        Ok(state.resolve(&ids))
    }
}

// =============================================================================
// Tests
// =============================================================================

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Registry service traits.

use async_trait::async_trait;

use crate::descriptor::{ShellDescriptor, SubmodelDescriptor};
use crate::error::RegistryResult;

// =============================================================================
// Registry Trait
// =============================================================================

/// Identifier → descriptor directory service.
///
/// # Atomicity
///
/// `register` and `delete` of one entry — including any secondary-index side
/// effects — form the unit of atomicity: concurrent lookups never observe a
/// partially applied mutation. Mutations on the same identifier are
/// serialized. Implementations backed by a transactional store rely on that
/// store's per-operation atomicity instead; a read-modify-write sequence
/// such as [`register_submodel`](Self::register_submodel) is then not atomic
/// across concurrent writers to the same entry.
#[async_trait]
pub trait Registry: Send + Sync {
    /// Registers a descriptor, fully replacing any entry with the same
    /// identifier (never merged).
    async fn register(&self, descriptor: ShellDescriptor) -> RegistryResult<()>;

    /// Registers a descriptor without the pre-delete of an existing entry.
    ///
    /// Used when the caller has already guaranteed non-existence, to avoid
    /// a redundant round trip.
    async fn register_only(&self, descriptor: ShellDescriptor) -> RegistryResult<()>;

    /// Looks up the descriptor registered under `id`.
    ///
    /// # Errors
    ///
    /// `RegistryError::NotFound` if no descriptor is registered.
    async fn lookup(&self, id: &str) -> RegistryResult<ShellDescriptor>;

    /// Returns all registered descriptors.
    async fn lookup_all(&self) -> RegistryResult<Vec<ShellDescriptor>>;

    /// Deletes the descriptor registered under `id`, including its entries
    /// in any tag index.
    async fn delete(&self, id: &str) -> RegistryResult<()>;

    /// Attaches a sub-model descriptor to an already registered shell
    /// descriptor.
    async fn register_submodel(
        &self,
        shell_id: &str,
        descriptor: SubmodelDescriptor,
    ) -> RegistryResult<()>;

    /// Detaches a sub-model descriptor from a registered shell descriptor.
    async fn delete_submodel(&self, shell_id: &str, id_short: &str) -> RegistryResult<()>;
}

// =============================================================================
// TaggedDirectory Trait
// =============================================================================

/// Registry extension with tag-based multi-criteria lookup.
#[async_trait]
pub trait TaggedDirectory: Registry {
    /// Returns every descriptor carrying the given tag.
    async fn lookup_by_tag(&self, tag: &str) -> RegistryResult<Vec<ShellDescriptor>>;

    /// Returns the intersection of the per-tag result sets.
    ///
    /// An empty tag set yields an empty result, not "all".
    async fn lookup_by_tags(&self, tags: &[String]) -> RegistryResult<Vec<ShellDescriptor>>;
}

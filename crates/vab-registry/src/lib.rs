// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # vab-registry
//!
//! Registry and directory services for the VAB virtual automation bus.
//!
//! The registry maps stable identifiers to descriptors: registration
//! records of shells and sub-models carrying their live network endpoints.
//! Clients consult the registry before any remote call to resolve an
//! identifier to a current endpoint.
//!
//! - **Descriptor**: the serialized registration record (wire contract)
//! - **Registry**: the directory service trait, storage-pluggable
//! - **MapRegistry**: in-memory implementation
//! - **MapTaggedDirectory**: in-memory implementation with a tag index for
//!   multi-criteria lookup

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod descriptor;
pub mod error;
pub mod memory;
pub mod registry;
pub mod tagged;

pub use descriptor::{Endpoint, EndpointKind, IdKind, Identifier, ShellDescriptor, SubmodelDescriptor};
pub use error::{RegistryError, RegistryResult};
pub use memory::MapRegistry;
pub use registry::{Registry, TaggedDirectory};
pub use tagged::MapTaggedDirectory;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

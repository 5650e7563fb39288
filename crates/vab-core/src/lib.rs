// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # vab-core
//!
//! Core abstractions for the VAB virtual automation bus: a hierarchical,
//! self-describing model tree reachable through a uniform CRUD+invoke
//! contract, regardless of which backend or transport carries it.
//!
//! This crate provides the foundational types and traits used across all
//! VAB components:
//!
//! - **Path**: pure slash-path helpers
//! - **Value**: the tagged-union model tree (scalars, sequences,
//!   insertion-ordered mappings, invokable operations)
//! - **Error**: the provider-error taxonomy and its wire-code mapping
//! - **Element**: pluggable per-container-kind access strategies
//! - **Provider**: the generic model provider and the `ModelProvider` trait
//! - **Routing**: the multi-submodel routing provider
//! - **Invocation**: asynchronous operation invocation handles
//! - **Wire**: the shared result envelope of the transport bindings
//!
//! ## Example
//!
//! ```rust,ignore
//! use vab_core::provider::{MapProvider, ModelProvider};
//! use vab_core::value::Value;
//! use vab_core::value_map;
//!
//! let provider = MapProvider::from_map(value_map! {
//!     "temp" => value_map! { "value" => 21.5f64 },
//! });
//! let value = provider.read("temp/value").await?;
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Core Modules
// =============================================================================

pub mod error;
pub mod path;
pub mod value;

// =============================================================================
// Provider Modules
// =============================================================================

pub mod element;
pub mod invocation;
pub mod provider;
pub mod routing;

// =============================================================================
// Wire Modules
// =============================================================================

pub mod wire;

// =============================================================================
// Re-exports for convenience
// =============================================================================

pub use error::{ProviderError, ProviderResult};
pub use value::{Operation, Value};

pub use element::{CompositeHandler, ElementHandler, ListHandler, MapHandler};
pub use provider::{MapProvider, ModelProvider, VabModelProvider};
pub use routing::{MultiSubmodelProvider, SHELL_SEGMENT, SUBMODELS_SEGMENT};

pub use invocation::{invoke_async, InvocationError, InvocationHandle};
pub use wire::{EnvelopeError, ResultEnvelope};

// Re-exported for the `value_map!` macro.
#[doc(hidden)]
pub use indexmap;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

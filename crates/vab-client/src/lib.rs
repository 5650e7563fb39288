// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # vab-client
//!
//! Client-side access to remote VAB nodes.
//!
//! A client resolves an identifier through the registry, builds a connector
//! for the resolved endpoint and wraps it in an [`ElementProxy`] scoped to
//! the element's base path. Connectors implement the same provider contract
//! as the server side, so local and remote trees are interchangeable behind
//! `dyn ModelProvider`.
//!
//! - **HttpConnector**: speaks the HTTP binding (reqwest)
//! - **TcpConnector**: speaks the framed TCP binding
//! - **ElementProxy**: base-path scoping and deep sub-proxies
//! - **HttpRegistryClient**: registry traits over the REST surface

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod http;
pub mod proxy;
pub mod registry;
pub mod tcp;

pub use http::HttpConnector;
pub use proxy::ElementProxy;
pub use registry::HttpRegistryClient;
pub use tcp::TcpConnector;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

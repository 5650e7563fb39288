// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # vab-http
//!
//! HTTP binding for the VAB virtual automation bus.
//!
//! Serves the shell namespace (`/shell/...`) with the GET/PUT/POST/DELETE/
//! PATCH verb mapping and, optionally, the registry REST surface
//! (`/registry`). This layer is the only place where the abstract error
//! taxonomy is translated to HTTP status codes, and the translation is
//! lossless in both directions.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::{ServerConfig, VabServer};
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

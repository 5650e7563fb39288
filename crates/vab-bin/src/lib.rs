// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # vab-bin
//!
//! The `vab` binary: hosts a shell model document over the HTTP and TCP
//! bindings, optionally serves a registry and announces itself to a remote
//! one.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod model;
pub mod shutdown;

pub use error::{BinError, BinResult};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

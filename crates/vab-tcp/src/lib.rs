// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # vab-tcp
//!
//! Raw TCP binding for the VAB virtual automation bus.
//!
//! The wire format is deliberately small: length-prefixed JSON frames
//! carrying the same CRUD+invoke operations and the same result envelope as
//! the HTTP binding. Failure codes reuse the HTTP numeric vocabulary, so a
//! client reconstructs the exact provider-error kind on either transport.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod frame;
pub mod protocol;
pub mod server;

pub use protocol::{TcpRequest, TcpResponse};
pub use server::TcpVabServer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

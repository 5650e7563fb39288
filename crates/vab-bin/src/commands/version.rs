// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `vab version` command.

/// Prints version information.
pub fn execute() {
    println!("vab {}", env!("CARGO_PKG_VERSION"));
}

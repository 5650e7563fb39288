// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # vab-tests
//!
//! Shared fixtures, builders and mocks for the integration suites under
//! `tests/`. Not published; test support only.

pub mod common;

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Binary-level error type.

use thiserror::Error;

use vab_config::error::ConfigError;
use vab_core::error::ProviderError;
use vab_registry::error::RegistryError;

/// A Result type with [`BinError`].
pub type BinResult<T> = Result<T, BinError>;

// =============================================================================
// BinError
// =============================================================================

/// Top-level error of the `vab` binary.
#[derive(Debug, Error)]
pub enum BinError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Model document error.
    #[error("Model error: {message}")]
    Model {
        /// Error message.
        message: String,
    },

    /// Provider error.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Registry error.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Server runtime error.
    #[error("Server error: {message}")]
    Server {
        /// Error message.
        message: String,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BinError {
    /// Creates a model document error.
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model { message: message.into() }
    }

    /// Creates a server runtime error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server { message: message.into() }
    }
}

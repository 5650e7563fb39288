// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Registry error types.

use thiserror::Error;
use vab_core::error::ProviderError;

/// A Result type with [`RegistryError`].
pub type RegistryResult<T> = Result<T, RegistryError>;

// =============================================================================
// RegistryError
// =============================================================================

/// Failure of a registry operation.
#[derive(Debug, Error, Clone)]
pub enum RegistryError {
    /// No descriptor is registered under the identifier.
    #[error("No descriptor registered for '{id}'")]
    NotFound {
        /// The unknown identifier.
        id: String,
    },

    /// The request conflicts with the registered state.
    #[error("Conflict for '{id}': {message}")]
    Conflict {
        /// The affected identifier.
        id: String,
        /// Error message.
        message: String,
    },

    /// The backing store failed.
    #[error("Registry backend error: {message}")]
    Backend {
        /// Error message.
        message: String,
    },
}

impl RegistryError {
    /// Creates a not-found error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates a conflict error.
    pub fn conflict(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conflict {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend { message: message.into() }
    }

    /// Returns `true` if this is a not-found error.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound { .. })
    }

    /// Returns the error type as a string for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            RegistryError::NotFound { .. } => "not_found",
            RegistryError::Conflict { .. } => "conflict",
            RegistryError::Backend { .. } => "backend",
        }
    }

    /// Returns the wire status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            RegistryError::NotFound { .. } => 404,
            RegistryError::Conflict { .. } => 422,
            RegistryError::Backend { .. } => 500,
        }
    }

    /// Reconstructs a registry error from a wire status code.
    pub fn from_status_code(code: u16, id: impl Into<String>, message: impl Into<String>) -> Self {
        match code {
            404 => Self::NotFound { id: id.into() },
            422 => Self::Conflict {
                id: id.into(),
                message: message.into(),
            },
            _ => Self::Backend { message: message.into() },
        }
    }
}

impl From<RegistryError> for ProviderError {
    fn from(err: RegistryError) -> Self {
        ProviderError::from_status_code(err.status_code(), err.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================

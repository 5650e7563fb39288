// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Unified error hierarchy for the bus.
//!
//! Provider failures use a small, transport-agnostic taxonomy that every
//! binding shares:
//!
//! ```text
//! ProviderError
//! ├── MalformedRequest       - bad path or arguments          (wire code 400)
//! ├── ResourceNotFound       - path or identifier absent      (wire code 404)
//! ├── ResourceAlreadyExists  - create on an occupied path     (wire code 422)
//! └── Provider               - anything else, wrapped uniformly (wire code 500)
//! ```
//!
//! The kind↔code mapping is bidirectional and lossless: servers translate a
//! kind into exactly one status code, clients translate the code back into
//! the same kind, so callers can react programmatically to the specific
//! failure. Delegating layers (routing provider, proxies) propagate these
//! errors unchanged; only transport adapters translate.

use thiserror::Error;

// =============================================================================
// ProviderError
// =============================================================================

/// A Result type with [`ProviderError`].
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Failure of a model-provider operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request itself was invalid (bad path, bad arguments).
    #[error("Malformed request: {message}")]
    MalformedRequest {
        /// Error message.
        message: String,
    },

    /// The addressed path or identifier does not exist.
    #[error("Resource not found: {message}")]
    ResourceNotFound {
        /// Error message.
        message: String,
    },

    /// A create targeted an already occupied path or identifier.
    #[error("Resource already exists: {message}")]
    ResourceAlreadyExists {
        /// Error message.
        message: String,
    },

    /// Any other provider failure, backend-specific causes included.
    #[error("Provider error: {message}")]
    Provider {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a malformed request error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest { message: message.into() }
    }

    /// Creates a resource not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound { message: message.into() }
    }

    /// Creates a resource already exists error.
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::ResourceAlreadyExists { message: message.into() }
    }

    /// Creates a generic provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider { message: message.into() }
    }

    /// Returns `true` if this is a not-found error.
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::ResourceNotFound { .. })
    }

    /// Returns the error type as a string for logging/metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::MalformedRequest { .. } => "malformed_request",
            ProviderError::ResourceNotFound { .. } => "resource_not_found",
            ProviderError::ResourceAlreadyExists { .. } => "resource_already_exists",
            ProviderError::Provider { .. } => "provider",
        }
    }

    /// Returns the wire status code for this error kind.
    ///
    /// This is the single fixed mapping shared by every HTTP-speaking
    /// component; the TCP binding reuses the same numeric vocabulary.
    pub fn status_code(&self) -> u16 {
        match self {
            ProviderError::MalformedRequest { .. } => 400,
            ProviderError::ResourceNotFound { .. } => 404,
            ProviderError::ResourceAlreadyExists { .. } => 422,
            ProviderError::Provider { .. } => 500,
        }
    }

    /// Reconstructs the error kind from a wire status code.
    ///
    /// Inverse of [`status_code`](Self::status_code): for each taxonomy kind,
    /// `from_status_code(e.status_code(), ..)` yields the same kind. Codes
    /// outside the mapping collapse into the generic kind.
    pub fn from_status_code(code: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            400 => Self::MalformedRequest { message },
            404 => Self::ResourceNotFound { message },
            422 => Self::ResourceAlreadyExists { message },
            _ => Self::Provider { message },
        }
    }

    /// Returns the inner message.
    pub fn message(&self) -> &str {
        match self {
            ProviderError::MalformedRequest { message }
            | ProviderError::ResourceNotFound { message }
            | ProviderError::ResourceAlreadyExists { message }
            | ProviderError::Provider { message } => message,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ProviderError::malformed("x").status_code(), 400);
        assert_eq!(ProviderError::not_found("x").status_code(), 404);
        assert_eq!(ProviderError::already_exists("x").status_code(), 422);
        assert_eq!(ProviderError::provider("x").status_code(), 500);
    }

    #[test]
    fn test_code_round_trip_is_identity() {
        let errors = [
            ProviderError::malformed("m"),
            ProviderError::not_found("m"),
            ProviderError::already_exists("m"),
            ProviderError::provider("m"),
        ];
        for e in errors {
            let back = ProviderError::from_status_code(e.status_code(), "m");
            assert_eq!(e.error_type(), back.error_type());
        }
    }

    #[test]
    fn test_unknown_code_maps_to_generic() {
        let e = ProviderError::from_status_code(418, "teapot");
        assert_eq!(e.error_type(), "provider");
    }

    #[test]
    fn test_is_not_found() {
        assert!(ProviderError::not_found("x").is_not_found());
        assert!(!ProviderError::malformed("x").is_not_found());
    }
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Shared result envelope.
//!
//! Every transport binding wraps replies in the same meta-protocol so that
//! clients decode success and failure uniformly. Failures carry the numeric
//! wire code of the provider-error taxonomy; decoding reconstructs the exact
//! error kind on the client side.

use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, ProviderResult};

/// Path suffix selecting operation invocation on the HTTP binding's POST.
pub const INVOKE_SUFFIX: &str = "invoke";

// =============================================================================
// ResultEnvelope
// =============================================================================

/// Reply wrapper used by the HTTP and TCP bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope<T> {
    /// Whether the operation was successful.
    pub success: bool,
    /// Result payload (if successful).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Failure details (if unsuccessful).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

/// Failure details inside a [`ResultEnvelope`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeError {
    /// Numeric wire code from the shared taxonomy mapping.
    pub code: u16,
    /// Error kind string for logging and categorization.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl<T> ResultEnvelope<T> {
    /// Creates a successful envelope with a payload.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Creates a successful envelope without a payload.
    pub fn empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// Creates a failure envelope from a provider error.
    pub fn failure(error: &ProviderError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(EnvelopeError {
                code: error.status_code(),
                kind: error.error_type().to_string(),
                message: error.message().to_string(),
            }),
        }
    }

    /// Unwraps the envelope into a provider result.
    ///
    /// A failure envelope reconstructs the provider error from its wire
    /// code, so the kind survives the round trip.
    pub fn into_result(self) -> ProviderResult<Option<T>> {
        if self.success {
            return Ok(self.data);
        }
        match self.error {
            Some(e) => Err(ProviderError::from_status_code(e.code, e.message)),
            None => Err(ProviderError::provider(
                "reply reported failure without details".to_string(),
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

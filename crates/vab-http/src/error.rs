// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP-facing error type.
//!
//! This is the only layer allowed to translate between the abstract error
//! taxonomy and HTTP status codes, and it does so losslessly in both
//! directions: the status code carries the error kind, the body carries the
//! kind string and message, and clients rebuild the exact provider error
//! from them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use vab_core::error::ProviderError;
use vab_core::wire::{EnvelopeError, ResultEnvelope};
use vab_core::Value;
use vab_registry::error::RegistryError;

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ApiError
// =============================================================================

/// Error returned from HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A provider operation failed.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// A registry operation failed.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// The request is invalid at the HTTP surface (before any provider runs).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The requested surface is not served by this node.
    #[error("Service unavailable: {message}")]
    ServiceUnavailable {
        /// Error message.
        message: String,
    },
}

impl ApiError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Creates a service unavailable error.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable { message: message.into() }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            ApiError::Provider(e) => e.status_code(),
            ApiError::Registry(e) => e.status_code(),
            ApiError::BadRequest { .. } => 400,
            ApiError::ServiceUnavailable { .. } => 503,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns the error kind string carried in the reply body.
    pub fn error_kind(&self) -> &'static str {
        match self {
            ApiError::Provider(e) => e.error_type(),
            ApiError::Registry(e) => e.error_type(),
            ApiError::BadRequest { .. } => "bad_request",
            ApiError::ServiceUnavailable { .. } => "service_unavailable",
        }
    }

    /// Returns `true` if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let kind = self.error_kind();
        let message = match &self {
            ApiError::Provider(e) => e.message().to_string(),
            other => other.to_string(),
        };

        if self.is_server_error() {
            tracing::error!(error = %self, kind, status = %status, "server error");
        } else {
            tracing::debug!(error = %self, kind, status = %status, "client error");
        }

        let body: ResultEnvelope<Value> = ResultEnvelope {
            success: false,
            data: None,
            error: Some(EnvelopeError {
                code: status.as_u16(),
                kind: kind.to_string(),
                message,
            }),
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

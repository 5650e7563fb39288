// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! TCP wire protocol.
//!
//! Requests and replies are JSON documents carried in length-prefixed
//! frames. Replies ride the shared result envelope; failure codes reuse the
//! numeric vocabulary of the HTTP mapping, so both transports carry the
//! same error kinds losslessly.

use serde::{Deserialize, Serialize};
use vab_core::error::{ProviderError, ProviderResult};
use vab_core::wire::ResultEnvelope;
use vab_core::Value;

/// One request on the TCP binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TcpRequest {
    /// Read the value at `path`.
    Read {
        /// Addressed path.
        path: String,
    },
    /// Replace the value at `path`.
    Write {
        /// Addressed path.
        path: String,
        /// New value.
        value: Value,
    },
    /// Create a value at `path`.
    Create {
        /// Addressed path.
        path: String,
        /// New value.
        value: Value,
    },
    /// Delete the value at `path`.
    Delete {
        /// Addressed path.
        path: String,
    },
    /// Delete the first matching element of the sequence at `path`.
    DeleteMatching {
        /// Addressed path.
        path: String,
        /// Probe value.
        value: Value,
    },
    /// Invoke the operation at `path`.
    Invoke {
        /// Addressed path.
        path: String,
        /// Operation arguments.
        args: Vec<Value>,
    },
}

impl TcpRequest {
    /// Returns the operation name for logging.
    pub fn op_name(&self) -> &'static str {
        match self {
            TcpRequest::Read { .. } => "read",
            TcpRequest::Write { .. } => "write",
            TcpRequest::Create { .. } => "create",
            TcpRequest::Delete { .. } => "delete",
            TcpRequest::DeleteMatching { .. } => "delete_matching",
            TcpRequest::Invoke { .. } => "invoke",
        }
    }

    /// Returns the addressed path.
    pub fn path(&self) -> &str {
        match self {
            TcpRequest::Read { path }
            | TcpRequest::Write { path, .. }
            | TcpRequest::Create { path, .. }
            | TcpRequest::Delete { path }
            | TcpRequest::DeleteMatching { path, .. }
            | TcpRequest::Invoke { path, .. } => path,
        }
    }
}

/// One reply on the TCP binding.
pub type TcpResponse = ResultEnvelope<Value>;

/// Encodes a request frame payload.
pub fn encode_request(request: &TcpRequest) -> ProviderResult<Vec<u8>> {
    serde_json::to_vec(request)
        .map_err(|e| ProviderError::provider(format!("failed to encode request: {e}")))
}

/// Decodes a request frame payload.
pub fn decode_request(payload: &[u8]) -> ProviderResult<TcpRequest> {
    serde_json::from_slice(payload)
        .map_err(|e| ProviderError::malformed(format!("invalid request frame: {e}")))
}

/// Encodes a reply frame payload.
pub fn encode_response(response: &TcpResponse) -> Vec<u8> {
    // The envelope serializes infallibly; fall back to a canned failure if
    // the payload itself cannot be encoded.
    serde_json::to_vec(response).unwrap_or_else(|e| {
        let fallback: TcpResponse =
            ResultEnvelope::failure(&ProviderError::provider(format!("encode failure: {e}")));
        serde_json::to_vec(&fallback).expect("fallback envelope encodes")
    })
}

/// Decodes a reply frame payload.
pub fn decode_response(payload: &[u8]) -> ProviderResult<TcpResponse> {
    serde_json::from_slice(payload)
        .map_err(|e| ProviderError::provider(format!("malformed reply frame: {e}")))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_round_trip() {
        let request = TcpRequest::Write {
            path: "shell/submodels/sm1/temp/value".to_string(),
            value: Value::Float(22.0),
        };
        let payload = encode_request(&request).unwrap();
        let back = decode_request(&payload).unwrap();
        assert_eq!(back.op_name(), "write");
        assert_eq!(back.path(), "shell/submodels/sm1/temp/value");
    }

    #[test]
    fn test_request_tag_shape() {
        let payload = encode_request(&TcpRequest::Read { path: "shell".into() }).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
        assert_eq!(json["op"], "read");
        assert_eq!(json["path"], "shell");
    }

    #[test]
    fn test_invalid_request_is_malformed() {
        let err = decode_request(b"{\"op\":\"nope\"}").unwrap_err();
        assert_eq!(err.error_type(), "malformed_request");
    }

    #[test]
    fn test_response_failure_round_trip() {
        let response: TcpResponse = ResultEnvelope::failure(&ProviderError::not_found("x"));
        let payload = encode_response(&response);
        let err = decode_response(&payload).unwrap().into_result().unwrap_err();
        assert!(err.is_not_found());
    }
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP connector.
//!
//! Implements the provider contract against a remote HTTP binding: each
//! call serializes the request, transmits it, awaits the reply and decodes
//! the shared result envelope. Transport-level failures (timeout, refused
//! connection, malformed reply) map into the generic provider-error kind;
//! remote failures are reconstructed losslessly from their wire code.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use url::Url;

use vab_core::error::{ProviderError, ProviderResult};
use vab_core::path;
use vab_core::provider::ModelProvider;
use vab_core::wire::{ResultEnvelope, INVOKE_SUFFIX};
use vab_core::Value;

// =============================================================================
// HttpConnector
// =============================================================================

/// Connector speaking the HTTP binding.
#[derive(Debug)]
pub struct HttpConnector {
    client: reqwest::Client,
    base: Url,
}

impl HttpConnector {
    /// Creates a connector for a node's base URL (scheme + authority).
    pub fn new(base_url: &str) -> ProviderResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Creates a connector with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ProviderResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ProviderError::malformed(format!("invalid base url '{base_url}': {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::provider(format!("failed to build http client: {e}")))?;
        Ok(Self { client, base })
    }

    /// Builds the URL for a slash path below the base.
    fn url_for(&self, vab_path: &str) -> ProviderResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ProviderError::malformed("base url cannot carry a path".to_string()))?;
            segments.pop_if_empty();
            segments.extend(path::split(vab_path));
        }
        Ok(url)
    }

    /// Sends a request and decodes the envelope reply.
    async fn execute(&self, request: RequestBuilder) -> ProviderResult<Option<Value>> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        match response.json::<ResultEnvelope<Value>>().await {
            Ok(envelope) => envelope.into_result(),
            Err(_) if !status.is_success() => Err(ProviderError::from_status_code(
                status.as_u16(),
                format!("response code: {status}"),
            )),
            Err(e) => Err(ProviderError::provider(format!("malformed reply: {e}"))),
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::provider("request timed out".to_string())
    } else {
        ProviderError::provider(format!("transport failure: {error}"))
    }
}

#[async_trait]
impl ModelProvider for HttpConnector {
    async fn read(&self, path: &str) -> ProviderResult<Value> {
        let url = self.url_for(path)?;
        let value = self.execute(self.client.get(url)).await?;
        Ok(value.unwrap_or(Value::Null))
    }

    async fn write(&self, path: &str, value: Value) -> ProviderResult<()> {
        let url = self.url_for(path)?;
        self.execute(self.client.put(url).json(&value)).await?;
        Ok(())
    }

    async fn create(&self, path: &str, value: Value) -> ProviderResult<()> {
        let url = self.url_for(path)?;
        self.execute(self.client.post(url).json(&value)).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ProviderResult<()> {
        let url = self.url_for(path)?;
        self.execute(self.client.delete(url)).await?;
        Ok(())
    }

    async fn delete_matching(&self, path: &str, value: Value) -> ProviderResult<()> {
        let url = self.url_for(path)?;
        self.execute(self.client.patch(url).json(&value)).await?;
        Ok(())
    }

    async fn invoke(&self, path: &str, args: Vec<Value>) -> ProviderResult<Value> {
        let url = self.url_for(&path::concat([path, INVOKE_SUFFIX]))?;
        let value = self
            .execute(self.client.post(url).json(&Value::Array(args)))
            .await?;
        Ok(value.unwrap_or(Value::Null))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_extends_base_path() {
        let connector = HttpConnector::new("http://localhost:8081").unwrap();
        let url = connector.url_for("shell/submodels/sm1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/shell/submodels/sm1");
    }

    #[test]
    fn test_url_for_encodes_segments() {
        let connector = HttpConnector::new("http://localhost:8081").unwrap();
        let url = connector.url_for("registry/urn:demo a").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/registry/urn:demo%20a");
    }

    #[test]
    fn test_invalid_base_url_is_malformed() {
        let err = HttpConnector::new("not a url").unwrap_err();
        assert_eq!(err.error_type(), "malformed_request");
    }

    #[tokio::test]
    async fn test_refused_connection_maps_to_generic_kind() {
        // Nothing listens on this port.
        let connector =
            HttpConnector::with_timeout("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let err = connector.read("shell").await.unwrap_err();
        assert_eq!(err.error_type(), "provider");
    }
}

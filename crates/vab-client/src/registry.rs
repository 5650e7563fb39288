// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP registry client.
//!
//! Implements the registry traits against a remote `/registry` REST
//! surface. Descriptor JSON passes through unmodified, so registration and
//! lookup round-trip losslessly.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use url::Url;

use vab_registry::descriptor::{ShellDescriptor, SubmodelDescriptor};
use vab_registry::error::{RegistryError, RegistryResult};
use vab_registry::registry::{Registry, TaggedDirectory};

// =============================================================================
// HttpRegistryClient
// =============================================================================

/// Client for a remote registry's REST surface.
pub struct HttpRegistryClient {
    client: reqwest::Client,
    base: Url,
}

impl HttpRegistryClient {
    /// Creates a client for a registry node's base URL.
    pub fn new(base_url: &str) -> RegistryResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Creates a client with an explicit request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> RegistryResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| RegistryError::backend(format!("invalid base url '{base_url}': {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RegistryError::backend(format!("failed to build http client: {e}")))?;
        Ok(Self { client, base })
    }

    fn url(&self, id: Option<&str>) -> RegistryResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RegistryError::backend("base url cannot carry a path".to_string()))?;
            segments.pop_if_empty().push("registry");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn check_status(&self, id: &str, response: Response) -> RegistryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(RegistryError::from_status_code(
            status.as_u16(),
            id,
            format!("response code: {status}"),
        ))
    }

    async fn fetch_list(&self, url: Url) -> RegistryResult<Vec<ShellDescriptor>> {
        let response = self.client.get(url).send().await.map_err(transport)?;
        let response = self.check_status("", response).await?;
        response
            .json::<Vec<ShellDescriptor>>()
            .await
            .map_err(|e| RegistryError::backend(format!("malformed reply: {e}")))
    }
}

fn transport(error: reqwest::Error) -> RegistryError {
    RegistryError::backend(format!("transport failure: {error}"))
}

#[async_trait]
impl Registry for HttpRegistryClient {
    async fn register(&self, descriptor: ShellDescriptor) -> RegistryResult<()> {
        let id = descriptor.id().to_string();
        let url = self.url(Some(&id))?;
        let response = self
            .client
            .put(url)
            .json(&descriptor)
            .send()
            .await
            .map_err(transport)?;
        self.check_status(&id, response).await?;
        Ok(())
    }

    async fn register_only(&self, descriptor: ShellDescriptor) -> RegistryResult<()> {
        let id = descriptor.id().to_string();
        let url = self.url(None)?;
        let response = self
            .client
            .post(url)
            .json(&descriptor)
            .send()
            .await
            .map_err(transport)?;
        self.check_status(&id, response).await?;
        Ok(())
    }

    async fn lookup(&self, id: &str) -> RegistryResult<ShellDescriptor> {
        let url = self.url(Some(id))?;
        let response = self.client.get(url).send().await.map_err(transport)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::not_found(id));
        }
        let response = self.check_status(id, response).await?;
        response
            .json::<ShellDescriptor>()
            .await
            .map_err(|e| RegistryError::backend(format!("malformed reply: {e}")))
    }

    async fn lookup_all(&self) -> RegistryResult<Vec<ShellDescriptor>> {
        self.fetch_list(self.url(None)?).await
    }

    async fn delete(&self, id: &str) -> RegistryResult<()> {
        let url = self.url(Some(id))?;
        let response = self.client.delete(url).send().await.map_err(transport)?;
        self.check_status(id, response).await?;
        Ok(())
    }

    /// Attach via lookup + replace.
    ///
    /// Two HTTP round trips: not atomic across concurrent writers to the
    /// same shell entry. Callers needing that guarantee must serialize on
    /// their side.
    async fn register_submodel(
        &self,
        shell_id: &str,
        descriptor: SubmodelDescriptor,
    ) -> RegistryResult<()> {
        let mut shell = self.lookup(shell_id).await?;
        shell.add_submodel_descriptor(descriptor);
        self.register(shell).await
    }

    async fn delete_submodel(&self, shell_id: &str, id_short: &str) -> RegistryResult<()> {
        let mut shell = self.lookup(shell_id).await?;
        if !shell.remove_submodel_descriptor(id_short) {
            return Err(RegistryError::not_found(format!("{shell_id}/{id_short}")));
        }
        self.register(shell).await
    }
}

#[async_trait]
impl TaggedDirectory for HttpRegistryClient {
    async fn lookup_by_tag(&self, tag: &str) -> RegistryResult<Vec<ShellDescriptor>> {
        let mut url = self.url(None)?;
        url.query_pairs_mut().append_pair("tags", tag);
        self.fetch_list(url).await
    }

    async fn lookup_by_tags(&self, tags: &[String]) -> RegistryResult<Vec<ShellDescriptor>> {
        if tags.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.url(None)?;
        url.query_pairs_mut().append_pair("tags", &tags.join(","));
        self.fetch_list(url).await
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_shapes() {
        let client = HttpRegistryClient::new("http://localhost:8081").unwrap();
        assert_eq!(
            client.url(None).unwrap().as_str(),
            "http://localhost:8081/registry"
        );
        assert_eq!(
            client.url(Some("urn:demo:1")).unwrap().as_str(),
            "http://localhost:8081/registry/urn:demo:1"
        );
    }

    #[tokio::test]
    async fn test_unreachable_registry_is_backend_error() {
        let client =
            HttpRegistryClient::with_timeout("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let err = client.lookup_all().await.unwrap_err();
        assert_eq!(err.error_type(), "backend");
    }
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! TCP connector.
//!
//! Speaks the framed wire protocol of `vab-tcp` over one lazily connected
//! stream. The stream is reused across calls and dropped after any I/O
//! error or timeout; the next call reconnects. Callers may share the
//! connector freely across tasks — calls serialize on the stream lock and
//! carry no cross-call ordering guarantee beyond that.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tracing::debug;

use vab_core::error::{ProviderError, ProviderResult};
use vab_core::provider::ModelProvider;
use vab_core::Value;
use vab_tcp::frame::{read_frame, write_frame};
use vab_tcp::protocol::{decode_response, encode_request, TcpRequest};

// =============================================================================
// TcpConnector
// =============================================================================

/// Connector speaking the raw TCP binding.
pub struct TcpConnector {
    addr: String,
    timeout: Duration,
    stream: Mutex<Option<TcpStream>>,
}

impl TcpConnector {
    /// Creates a connector for a `host:port` address.
    pub fn new(addr: impl Into<String>) -> Self {
        Self::with_timeout(addr, Duration::from_secs(30))
    }

    /// Creates a connector with an explicit per-request timeout.
    pub fn with_timeout(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
            stream: Mutex::new(None),
        }
    }

    async fn request(&self, request: TcpRequest) -> ProviderResult<Option<Value>> {
        let payload = encode_request(&request)?;
        let mut guard = self.stream.lock().await;

        let mut stream = match guard.take() {
            Some(stream) => stream,
            None => {
                debug!(addr = %self.addr, "connecting");
                tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr))
                    .await
                    .map_err(|_| timed_out())?
                    .map_err(|e| {
                        ProviderError::provider(format!("connection to {} failed: {e}", self.addr))
                    })?
            }
        };

        let reply = tokio::time::timeout(self.timeout, async {
            write_frame(&mut stream, &payload).await?;
            read_frame(&mut stream).await
        })
        .await;

        match reply {
            Ok(Ok(Some(bytes))) => {
                // Keep the healthy stream for the next call.
                *guard = Some(stream);
                decode_response(&bytes)?.into_result()
            }
            Ok(Ok(None)) => Err(ProviderError::provider(
                "connection closed before reply".to_string(),
            )),
            Ok(Err(e)) => Err(ProviderError::provider(format!("transport failure: {e}"))),
            Err(_) => Err(timed_out()),
        }
    }
}

fn timed_out() -> ProviderError {
    ProviderError::provider("request timed out".to_string())
}

#[async_trait]
impl ModelProvider for TcpConnector {
    async fn read(&self, path: &str) -> ProviderResult<Value> {
        let value = self.request(TcpRequest::Read { path: path.to_string() }).await?;
        Ok(value.unwrap_or(Value::Null))
    }

    async fn write(&self, path: &str, value: Value) -> ProviderResult<()> {
        self.request(TcpRequest::Write { path: path.to_string(), value })
            .await?;
        Ok(())
    }

    async fn create(&self, path: &str, value: Value) -> ProviderResult<()> {
        self.request(TcpRequest::Create { path: path.to_string(), value })
            .await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> ProviderResult<()> {
        self.request(TcpRequest::Delete { path: path.to_string() }).await?;
        Ok(())
    }

    async fn delete_matching(&self, path: &str, value: Value) -> ProviderResult<()> {
        self.request(TcpRequest::DeleteMatching { path: path.to_string(), value })
            .await?;
        Ok(())
    }

    async fn invoke(&self, path: &str, args: Vec<Value>) -> ProviderResult<Value> {
        let value = self
            .request(TcpRequest::Invoke { path: path.to_string(), args })
            .await?;
        Ok(value.unwrap_or(Value::Null))
    }
}

// =============================================================================
// Tests
// =============================================================================

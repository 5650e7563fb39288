// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! TCP server loop.
//!
//! Accepts connections and serves the framed wire protocol against one
//! model provider, one tokio task per connection. A connection stays open
//! across requests; it closes on client EOF, on an I/O error, or when the
//! shutdown signal fires.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use vab_core::provider::ModelProvider;
use vab_core::wire::ResultEnvelope;

use crate::frame::{read_frame, write_frame};
use crate::protocol::{decode_request, encode_response, TcpRequest, TcpResponse};

// =============================================================================
// TcpVabServer
// =============================================================================

/// TCP binding server for one model provider.
pub struct TcpVabServer {
    provider: Arc<dyn ModelProvider>,
    listener: TcpListener,
    shutdown: broadcast::Sender<()>,
}

impl TcpVabServer {
    /// Binds the server to an address.
    pub async fn bind(
        provider: Arc<dyn ModelProvider>,
        addr: &str,
    ) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let (shutdown, _) = broadcast::channel(1);
        Ok(Self {
            provider,
            listener,
            shutdown,
        })
    }

    /// Returns the bound local address.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Returns a handle that stops the accept loop and open connections.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown.clone()
    }

    /// Runs the accept loop until the shutdown signal fires.
    pub async fn serve(self) -> std::io::Result<()> {
        let addr = self.local_addr()?;
        info!(%addr, "TCP binding listening");

        let mut shutdown_rx = self.shutdown.subscribe();
        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    let (stream, peer) = accepted?;
                    debug!(%peer, "connection accepted");
                    let provider = self.provider.clone();
                    let shutdown_rx = self.shutdown.subscribe();
                    tokio::spawn(async move {
                        if let Err(error) = serve_connection(stream, provider, shutdown_rx).await {
                            debug!(%peer, %error, "connection closed with error");
                        }
                    });
                }
                _ = shutdown_rx.recv() => {
                    info!(%addr, "TCP binding shutting down");
                    return Ok(());
                }
            }
        }
    }

    /// Runs the accept loop and triggers shutdown when `signal` resolves.
    pub async fn serve_with_shutdown(
        self,
        signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> std::io::Result<()> {
        let shutdown = self.shutdown_handle();
        tokio::spawn(async move {
            signal.await;
            let _ = shutdown.send(());
        });
        self.serve().await
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    provider: Arc<dyn ModelProvider>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    loop {
        let payload = tokio::select! {
            frame = read_frame(&mut stream) => match frame? {
                Some(payload) => payload,
                None => return Ok(()),
            },
            _ = shutdown_rx.recv() => return Ok(()),
        };

        let response = match decode_request(&payload) {
            Ok(request) => dispatch(provider.as_ref(), request).await,
            Err(error) => {
                warn!(%error, "rejecting undecodable request frame");
                ResultEnvelope::failure(&error)
            }
        };
        write_frame(&mut stream, &encode_response(&response)).await?;
    }
}

async fn dispatch(provider: &dyn ModelProvider, request: TcpRequest) -> TcpResponse {
    let op = request.op_name();
    let path = request.path().to_string();

    let result = match request {
        TcpRequest::Read { path } => provider.read(&path).await.map(Some),
        TcpRequest::Write { path, value } => provider.write(&path, value).await.map(|_| None),
        TcpRequest::Create { path, value } => provider.create(&path, value).await.map(|_| None),
        TcpRequest::Delete { path } => provider.delete(&path).await.map(|_| None),
        TcpRequest::DeleteMatching { path, value } => {
            provider.delete_matching(&path, value).await.map(|_| None)
        }
        TcpRequest::Invoke { path, args } => provider.invoke(&path, args).await.map(Some),
    };

    match result {
        Ok(Some(value)) => ResultEnvelope::ok(value),
        Ok(None) => ResultEnvelope::empty(),
        Err(error) => {
            debug!(op, %path, %error, "request failed");
            ResultEnvelope::failure(&error)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame;
    use crate::protocol::{decode_response, encode_request};
    use tokio::net::TcpStream;
    use vab_core::provider::MapProvider;
    use vab_core::value_map;
    use vab_core::Value;

    async fn start_server() -> SocketAddr {
        let provider = Arc::new(MapProvider::from_map(value_map! {
            "temp" => value_map! { "value" => 21.5f64 },
        }));
        let server = TcpVabServer::bind(provider, "127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.serve());
        addr
    }

    async fn roundtrip(stream: &mut TcpStream, request: &TcpRequest) -> TcpResponse {
        let payload = encode_request(request).unwrap();
        frame::write_frame(stream, &payload).await.unwrap();
        let reply = frame::read_frame(stream).await.unwrap().unwrap();
        decode_response(&reply).unwrap()
    }

    #[tokio::test]
    async fn test_read_and_write_over_tcp() {
        let addr = start_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        let response = roundtrip(&mut stream, &TcpRequest::Read { path: "temp/value".into() }).await;
        assert_eq!(response.into_result().unwrap(), Some(Value::Float(21.5)));

        roundtrip(
            &mut stream,
            &TcpRequest::Write { path: "temp/value".into(), value: Value::Float(22.0) },
        )
        .await;
        let response = roundtrip(&mut stream, &TcpRequest::Read { path: "temp/value".into() }).await;
        assert_eq!(response.into_result().unwrap(), Some(Value::Float(22.0)));
    }

    #[tokio::test]
    async fn test_error_kind_crosses_the_wire() {
        let addr = start_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        let response = roundtrip(&mut stream, &TcpRequest::Read { path: "missing".into() }).await;
        assert!(response.into_result().unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_undecodable_frame_is_malformed_request() {
        let addr = start_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        frame::write_frame(&mut stream, b"not json").await.unwrap();
        let reply = frame::read_frame(&mut stream).await.unwrap().unwrap();
        let err = decode_response(&reply).unwrap().into_result().unwrap_err();
        assert_eq!(err.error_type(), "malformed_request");
    }
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP server.

use std::time::Duration;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::routes;
use crate::state::AppState;

// =============================================================================
// ServerConfig
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Returns the bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8081,
            request_timeout: Duration::from_secs(30),
        }
    }
}

// =============================================================================
// VabServer
// =============================================================================

/// The HTTP binding server.
pub struct VabServer {
    state: AppState,
    config: ServerConfig,
}

impl VabServer {
    /// Creates a server over the given state with default settings.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            config: ServerConfig::default(),
        }
    }

    /// Replaces the server settings.
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Creates the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let middleware = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(self.config.request_timeout))
            .layer(CorsLayer::permissive());

        let mut router = routes::shell::router();
        if self.state.has_registry() {
            router = router.merge(routes::registry::router());
        }
        router.layer(middleware).with_state(self.state.clone())
    }

    /// Runs the server.
    pub async fn run(self) -> ApiResult<()> {
        let addr = self.config.addr();
        let router = self.router();

        info!(%addr, "HTTP binding listening");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::service_unavailable(format!("failed to bind {addr}: {e}")))?;
        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::service_unavailable(format!("server error: {e}")))?;
        Ok(())
    }

    /// Runs the server with graceful shutdown.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let addr = self.config.addr();
        let router = self.router();

        info!(%addr, "HTTP binding listening");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::service_unavailable(format!("failed to bind {addr}: {e}")))?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| ApiError::service_unavailable(format!("server error: {e}")))?;

        info!(%addr, "HTTP binding shutdown complete");
        Ok(())
    }
}

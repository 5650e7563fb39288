// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The `vab run` command.

use std::sync::Arc;

use tracing::{info, warn};

use vab_client::HttpRegistryClient;
use vab_config::{ConfigLoader, VabConfig};
use vab_http::{AppState, ServerConfig, VabServer};
use vab_registry::registry::Registry;
use vab_registry::MapTaggedDirectory;
use vab_tcp::TcpVabServer;

use crate::cli::RunArgs;
use crate::error::{BinError, BinResult};
use crate::model::ModelDocument;
use crate::shutdown::ShutdownCoordinator;

/// Runs a bus node until a shutdown signal arrives.
pub async fn execute(args: &RunArgs) -> BinResult<()> {
    let config = ConfigLoader::new().load(&args.config)?;
    let document = match &config.node.model_path {
        Some(path) => ModelDocument::load(path)?,
        None => ModelDocument::empty(),
    };

    let provider = Arc::new(document.build_provider(&config.node.id_short)?);
    let mut state = AppState::new(provider.clone());

    let http_base = format!("http://{}", config.http.addr());
    let descriptor = document.descriptor(&config.node.id_short, &http_base);

    if config.registry.serve {
        let registry = Arc::new(MapTaggedDirectory::new());
        registry.register(descriptor.clone()).await?;
        state = state.with_registry(registry);
        info!("serving /registry");
    }

    announce(&config, &descriptor).await;

    let shutdown = ShutdownCoordinator::new();
    shutdown.install_signal_handlers();

    let http_server = VabServer::new(state).with_config(ServerConfig {
        host: config.http.host.clone(),
        port: config.http.port,
        request_timeout: config.http.request_timeout(),
    });
    let http_task = tokio::spawn(http_server.run_with_shutdown(shutdown.signal()));

    let tcp_task = if config.tcp.enabled {
        let server = TcpVabServer::bind(provider, &config.tcp.addr()).await?;
        Some(tokio::spawn(server.serve_with_shutdown(shutdown.signal())))
    } else {
        None
    };

    info!(shell = %descriptor.id_short, "node running");

    http_task
        .await
        .map_err(|e| BinError::server(format!("http task panicked: {e}")))?
        .map_err(|e| BinError::server(e.to_string()))?;

    if let Some(task) = tcp_task {
        task.await
            .map_err(|e| BinError::server(format!("tcp task panicked: {e}")))?
            .map_err(BinError::Io)?;
    }

    info!("node stopped");
    Ok(())
}

/// Announces this node's descriptor to a remote registry, if configured.
///
/// Announcement is best-effort: a dead registry must not keep the node from
/// serving.
async fn announce(config: &VabConfig, descriptor: &vab_registry::ShellDescriptor) {
    let Some(endpoint) = &config.registry.announce_endpoint else {
        return;
    };
    let client = match HttpRegistryClient::new(endpoint) {
        Ok(client) => client,
        Err(error) => {
            warn!(%endpoint, %error, "invalid announce endpoint");
            return;
        }
    };
    match client.register(descriptor.clone()).await {
        Ok(()) => info!(%endpoint, id = %descriptor.id(), "announced to registry"),
        Err(error) => warn!(%endpoint, %error, "registry announcement failed"),
    }
}

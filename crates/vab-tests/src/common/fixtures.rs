// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Ready-made component fixtures.

use std::sync::Arc;

use vab_core::provider::MapProvider;
use vab_core::routing::MultiSubmodelProvider;
use vab_http::{AppState, VabServer};
use vab_registry::MapTaggedDirectory;

use super::builders;

/// The routing provider of the concrete reference scenario: shell
/// `aasIdShort` with sub-model `sm1` whose `temp` property is `21.5`.
pub fn scenario_provider() -> MultiSubmodelProvider {
    let router = MultiSubmodelProvider::with_shell(Arc::new(MapProvider::from_map(
        builders::shell_tree("aasIdShort"),
    )));
    router.add_submodel(
        "sm1",
        Arc::new(MapProvider::from_map(builders::temperature_submodel("sm1", 21.5))),
    );
    router
}

/// Starts an HTTP node serving the scenario provider plus a registry, on an
/// ephemeral port. Returns the base URL.
pub async fn spawn_http_node() -> String {
    let state = AppState::new(Arc::new(scenario_provider()))
        .with_registry(Arc::new(MapTaggedDirectory::new()));
    let router = VabServer::new(state).router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum_serve(listener, router).await;
    });
    format!("http://{addr}")
}

async fn axum_serve(listener: tokio::net::TcpListener, router: axum::Router) {
    let _ = axum::serve(listener, router).await;
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # HTTP Integration Tests
//!
//! The full client/server loop: axum binding on an ephemeral port, reached
//! through the HTTP connector and element proxies. Covers the reference
//! scenario, error-kind round trips and the registry REST surface.

use std::sync::Arc;

use vab_client::{ElementProxy, HttpConnector, HttpRegistryClient};
use vab_core::provider::ModelProvider;
use vab_core::{value_map, Value};
use vab_registry::registry::{Registry, TaggedDirectory};
use vab_tests::common::{builders, fixtures};

async fn connector() -> (String, Arc<HttpConnector>) {
    let base = fixtures::spawn_http_node().await;
    let connector = Arc::new(HttpConnector::new(&base).unwrap());
    (base, connector)
}

#[tokio::test]
async fn test_scenario_over_http() {
    let (_base, connector) = connector().await;

    assert_eq!(
        connector.read("shell/submodels/sm1/temp/value").await.unwrap(),
        Value::Float(21.5)
    );

    connector
        .write("shell/submodels/sm1/temp/value", Value::Float(22.0))
        .await
        .unwrap();
    assert_eq!(
        connector.read("shell/submodels/sm1/temp/value").await.unwrap(),
        Value::Float(22.0)
    );

    connector.delete("shell/submodels/sm1/temp").await.unwrap();
    let err = connector
        .read("shell/submodels/sm1/temp/value")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_error_kinds_round_trip_over_http() {
    let (_base, connector) = connector().await;

    let err = connector.read("shell/submodels/ghost").await.unwrap_err();
    assert_eq!(err.error_type(), "resource_not_found");

    let err = connector
        .create("shell/submodels/sm1/idShort", Value::Str("x".into()))
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "resource_already_exists");

    let err = connector
        .create("shell/submodels", value_map! {})
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "malformed_request");
}

#[tokio::test]
async fn test_write_never_creates_over_http() {
    let (_base, connector) = connector().await;

    connector
        .write("shell/submodels/sm1/fresh", Value::Int(1))
        .await
        .unwrap();
    assert!(connector
        .read("shell/submodels/sm1/fresh")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_invoke_over_http() {
    let (_base, connector) = connector().await;

    let result = connector
        .invoke("shell/submodels/sm1/reset", vec![])
        .await
        .unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[tokio::test]
async fn test_proxy_and_deep_proxy_over_http() {
    let (_base, connector) = connector().await;

    let shell = ElementProxy::connect(connector.clone(), "shell").await.unwrap();
    assert_eq!(shell.id_short(), Some("aasIdShort"));

    let sm1 = shell.deep_proxy("submodels/sm1");
    assert_eq!(sm1.read("temp/value").await.unwrap(), Value::Float(21.5));

    let temp = sm1.deep_proxy("temp");
    temp.write("value", Value::Float(23.0)).await.unwrap();
    assert_eq!(
        connector.read("shell/submodels/sm1/temp/value").await.unwrap(),
        Value::Float(23.0)
    );
}

#[tokio::test]
async fn test_registry_rest_surface() {
    let (base, _connector) = connector().await;
    let client = HttpRegistryClient::new(&base).unwrap();

    let descriptor = builders::shell_descriptor("robot", "http://robot:8081/shell", &["robot", "line-4"]);
    let id = descriptor.id().to_string();

    client.register_only(descriptor.clone()).await.unwrap();
    assert_eq!(client.lookup(&id).await.unwrap(), descriptor);

    // Replace wholesale: the old endpoint list must no longer be reachable.
    let replacement =
        builders::shell_descriptor("robot", "http://robot:9090/shell", &["robot"]);
    client.register(replacement.clone()).await.unwrap();
    let found = client.lookup(&id).await.unwrap();
    assert_eq!(found.first_endpoint().unwrap().address, "http://robot:9090/shell");

    // Tag lookups go through the same surface.
    let tagged = client.lookup_by_tag("robot").await.unwrap();
    assert_eq!(tagged.len(), 1);
    assert!(client.lookup_by_tags(&[]).await.unwrap().is_empty());

    client.delete(&id).await.unwrap();
    assert!(client.lookup(&id).await.unwrap_err().is_not_found());
    assert!(client.delete(&id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_registry_submodel_attach_via_client() {
    let (base, _connector) = connector().await;
    let client = HttpRegistryClient::new(&base).unwrap();

    let descriptor = builders::shell_descriptor("cell", "http://cell:8081/shell", &[]);
    let id = descriptor.id().to_string();
    client.register_only(descriptor).await.unwrap();

    client
        .register_submodel(&id, builders::submodel_descriptor("telemetry"))
        .await
        .unwrap();
    assert!(client.lookup(&id).await.unwrap().submodel("telemetry").is_some());

    client.delete_submodel(&id, "telemetry").await.unwrap();
    assert!(client.lookup(&id).await.unwrap().submodel("telemetry").is_none());
}

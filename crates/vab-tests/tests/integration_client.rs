// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Client Integration Tests
//!
//! Proxy behavior against a recording mock connector: base-path
//! resolution, deep-proxy scoping and transparent error propagation.

use vab_client::ElementProxy;
use vab_core::provider::ModelProvider;
use vab_core::{value_map, Value};
use vab_tests::common::mocks::MockConnector;

#[tokio::test]
async fn test_proxy_sends_absolute_paths_to_connector() {
    let mock = MockConnector::new(Value::Null);
    let proxy = ElementProxy::new(mock.clone(), "/shell/submodels/sm1/");

    proxy.read("temp/value").await.unwrap();
    proxy.write("temp/value", Value::Float(1.0)).await.unwrap();
    proxy.delete("temp").await.unwrap();

    let paths: Vec<String> = mock.calls().into_iter().map(|c| c.path).collect();
    assert_eq!(
        paths,
        [
            "shell/submodels/sm1/temp/value",
            "shell/submodels/sm1/temp/value",
            "shell/submodels/sm1/temp",
        ]
    );
}

#[tokio::test]
async fn test_deep_proxy_shares_the_connector() {
    let mock = MockConnector::new(Value::Null);
    let root = ElementProxy::new(mock.clone(), "shell");

    let nested = root.deep_proxy("submodels/sm1").deep_proxy("temp");
    nested.read("value").await.unwrap();

    assert_eq!(mock.calls()[0].path, "shell/submodels/sm1/temp/value");
    assert_eq!(mock.calls()[0].op, "read");
}

#[tokio::test]
async fn test_connect_reads_id_short_from_initial_read() {
    let mock = MockConnector::new(value_map! { "idShort" => "sm1", "temp" => 21.5f64 });
    let proxy = ElementProxy::connect(mock.clone(), "shell/submodels/sm1")
        .await
        .unwrap();

    assert_eq!(proxy.id_short(), Some("sm1"));
    // Exactly one full read at construction time.
    assert_eq!(mock.calls().len(), 1);
    assert_eq!(mock.calls()[0].path, "shell/submodels/sm1");
}

#[tokio::test]
async fn test_injected_failures_surface_unchanged() {
    let mock = MockConnector::new(Value::Null);
    mock.fail_all(true);

    let proxy = ElementProxy::new(mock, "shell");
    let err = proxy.read("x").await.unwrap_err();
    assert_eq!(err.error_type(), "provider");
}

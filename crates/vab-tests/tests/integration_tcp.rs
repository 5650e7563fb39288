// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # TCP Integration Tests
//!
//! The framed TCP binding end to end: server loop on an ephemeral port,
//! reached through the TCP connector and element proxies.

use std::sync::Arc;

use vab_client::{ElementProxy, TcpConnector};
use vab_core::provider::ModelProvider;
use vab_core::Value;
use vab_tcp::TcpVabServer;
use vab_tests::common::fixtures;

async fn spawn_tcp_node() -> String {
    let provider = Arc::new(fixtures::scenario_provider());
    let server = TcpVabServer::bind(provider, "127.0.0.1:0").await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.serve());
    addr.to_string()
}

#[tokio::test]
async fn test_scenario_over_tcp() {
    let addr = spawn_tcp_node().await;
    let connector = TcpConnector::new(&addr);

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
    assert!(connector
        .read("shell/submodels/sm1/temp/value")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_error_kinds_round_trip_over_tcp() {
    let addr = spawn_tcp_node().await;
    let connector = TcpConnector::new(&addr);

    let err = connector.read("shell/submodels/ghost").await.unwrap_err();
    assert_eq!(err.error_type(), "resource_not_found");

    let err = connector
        .create("shell/submodels/sm1/idShort", Value::Str("x".into()))
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "resource_already_exists");
}

#[tokio::test]
async fn test_connection_reuse_across_calls() {
    let addr = spawn_tcp_node().await;
    let connector = Arc::new(TcpConnector::new(&addr));

    // Many sequential calls over the same connector share one stream.
    for _ in 0..16 {
        connector.read("shell").await.unwrap();
    }

    let proxy = ElementProxy::new(connector, "shell/submodels/sm1");
    assert_eq!(
        proxy.invoke("reset", vec![]).await.unwrap(),
        Value::Bool(true)
    );
}

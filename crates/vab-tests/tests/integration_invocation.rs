// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Invocation Integration Tests
//!
//! Asynchronous invocation against local providers and through remote
//! proxies: completion ordering, result equivalence with synchronous
//! invoke, and the operation-failure/plumbing-failure distinction.

use std::sync::Arc;
use std::time::Duration;

use vab_client::HttpConnector;
use vab_core::error::ProviderError;
use vab_core::invocation::invoke_async;
use vab_core::provider::{MapProvider, ModelProvider};
use vab_core::{value_map, Value};
use vab_tests::common::fixtures;

fn operations() -> Arc<dyn ModelProvider> {
    Arc::new(MapProvider::from_map(value_map! {
        "add" => Value::invokable(|args| {
            let a = args.first().and_then(Value::as_f64).unwrap_or_default();
            let b = args.get(1).and_then(Value::as_f64).unwrap_or_default();
            Ok(Value::Float(a + b))
        }),
        "slow" => Value::invokable(|_| {
            std::thread::sleep(Duration::from_millis(40));
            Ok(Value::Str("done".into()))
        }),
        "broken" => Value::invokable(|_| Err(ProviderError::provider("device offline"))),
    }))
}

#[tokio::test]
async fn test_async_equals_sync_result() {
    let provider = operations();
    let args = vec![Value::Float(2.0), Value::Float(3.5)];

    let sync = provider.invoke("add", args.clone()).await.unwrap();
    let handle = invoke_async(provider, "add", args);
    assert_eq!(handle.get_result().await.unwrap(), sync);
}

#[tokio::test]
async fn test_poll_then_consume() {
    let handle = invoke_async(operations(), "slow", vec![]);
    assert!(!handle.is_finished());

    while !handle.is_finished() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(handle.get_result().await.unwrap(), Value::Str("done".into()));
}

#[tokio::test]
async fn test_operation_failure_is_distinguished() {
    let handle = invoke_async(operations(), "broken", vec![]);
    let err = handle.get_result().await.unwrap_err();

    let inner = err.as_operation_error().expect("operation failed, not plumbing");
    assert_eq!(inner.error_type(), "provider");
    assert!(inner.message().contains("device offline"));
}

#[tokio::test]
async fn test_typed_wrapper_arguments_collapse() {
    let provider = operations();
    let wrapped = vec![
        value_map! { "valueType" => "double", "value" => 1.5f64 },
        value_map! { "valueType" => "double", "value" => 2.0f64 },
    ];
    assert_eq!(
        provider.invoke("add", wrapped).await.unwrap(),
        Value::Float(3.5)
    );
}

#[tokio::test]
async fn test_async_invocation_through_remote_connector() {
    let base = fixtures::spawn_http_node().await;
    let connector: Arc<dyn ModelProvider> = Arc::new(HttpConnector::new(&base).unwrap());

    let handle = invoke_async(connector, "shell/submodels/sm1/reset", vec![]);
    assert_eq!(handle.get_result().await.unwrap(), Value::Bool(true));
}

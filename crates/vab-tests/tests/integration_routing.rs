// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Routing Integration Tests
//!
//! End-to-end behavior of the multi-submodel routing provider over real
//! map providers, including the reference scenario and delegation
//! independence.

use std::sync::Arc;

use vab_core::provider::{MapProvider, ModelProvider};
use vab_core::{value_map, Value};
use vab_tests::common::{builders, fixtures};

#[tokio::test]
async fn test_scenario_read_write_delete() {
    let router = fixtures::scenario_provider();

    assert_eq!(
        router.read("/shell/submodels/sm1/temp/value").await.unwrap(),
        Value::Float(21.5)
    );

    router
        .write("/shell/submodels/sm1/temp/value", Value::Float(22.0))
        .await
        .unwrap();
    assert_eq!(
        router.read("/shell/submodels/sm1/temp/value").await.unwrap(),
        Value::Float(22.0)
    );

    router.delete("/shell/submodels/sm1/temp").await.unwrap();
    let err = router
        .read("/shell/submodels/sm1/temp/value")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delegation_equals_direct_access() {
    let direct = Arc::new(MapProvider::from_map(builders::temperature_submodel("a", 3.5)));
    let router = fixtures::scenario_provider();
    router.add_submodel("a", direct.clone());
    router.add_submodel(
        "b",
        Arc::new(MapProvider::from_map(value_map! { "noise" => true })),
    );

    // The routed read equals the direct read and ignores sibling content.
    assert_eq!(
        router.read("/shell/submodels/a/temp/value").await.unwrap(),
        direct.read("/temp/value").await.unwrap()
    );
}

#[tokio::test]
async fn test_create_through_router_appends_to_collection() {
    let router = fixtures::scenario_provider();

    router
        .create("/shell/submodels/sm1/history", Value::Float(21.5))
        .await
        .unwrap();
    router
        .create("/shell/submodels/sm1/history", Value::Float(22.0))
        .await
        .unwrap();

    let history = router.read("/shell/submodels/sm1/history").await.unwrap();
    assert_eq!(
        history,
        Value::Array(vec![Value::Float(21.5), Value::Float(22.0)])
    );

    // PATCH-style removal of one matching element.
    router
        .delete_matching("/shell/submodels/sm1/history", Value::Float(21.5))
        .await
        .unwrap();
    assert_eq!(
        router.read("/shell/submodels/sm1/history").await.unwrap(),
        Value::Array(vec![Value::Float(22.0)])
    );
}

#[tokio::test]
async fn test_invoke_through_router() {
    let router = fixtures::scenario_provider();
    let result = router
        .invoke("/shell/submodels/sm1/reset", vec![])
        .await
        .unwrap();
    assert_eq!(result, Value::Bool(true));
}

#[tokio::test]
async fn test_not_found_propagates_unchanged_through_layers() {
    let router = fixtures::scenario_provider();

    // Raised deep inside the sub-model provider, surfaced with the same kind.
    let err = router
        .read("/shell/submodels/sm1/temp/missing")
        .await
        .unwrap_err();
    assert_eq!(err.error_type(), "resource_not_found");

    // Raised by the router itself for an unknown identifier.
    let err = router.read("/shell/submodels/ghost/x").await.unwrap_err();
    assert_eq!(err.error_type(), "resource_not_found");
}

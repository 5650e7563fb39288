// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The model provider abstraction and its generic implementation.
//!
//! A provider answers the uniform CRUD+invoke contract for one model tree.
//! [`VabModelProvider`] implements the contract generically: it owns one root
//! [`Value`] and one [`ElementHandler`], and resolves paths by a left-to-right
//! fold over the segments with no backtracking and no caching — resolution
//! cost is O(depth).
//!
//! # Thread safety
//!
//! The root is shared mutable state guarded by a single mutex around every
//! operation. Backends that wrap a transactional store instead rely on that
//! store's per-operation atomicity; a multi-step read-modify-write sequence
//! against such a store is not atomic across concurrent writers to the same
//! entity.

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::element::{CompositeHandler, ElementHandler};
use crate::error::{ProviderError, ProviderResult};
use crate::path;
use crate::value::{unwrap_arguments, Operation, Value, INVOKABLE_KEY};

// =============================================================================
// ModelProvider Trait
// =============================================================================

/// The uniform access contract for one model tree.
///
/// Every implementation — in-memory trees, routing fan-outs, remote
/// connectors — answers the same six operations against slash paths.
/// Delegating layers propagate [`ProviderError`]s unchanged; a not-found
/// raised deep inside a nested sub-model surfaces as not-found to the
/// original caller.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Reads the value at `path`. The empty path reads the whole root.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` if any path segment cannot be resolved.
    async fn read(&self, path: &str) -> ProviderResult<Value>;

    /// Replaces the value at `path`.
    ///
    /// Writing never creates: a write whose target (or parent) does not
    /// exist leaves the tree unchanged and reports success. The empty path
    /// replaces the root only if a root already exists.
    async fn write(&self, path: &str, value: Value) -> ProviderResult<()>;

    /// Creates a new value at `path`.
    ///
    /// The only operation allowed to introduce new tree structure. The empty
    /// path initializes an absent root.
    ///
    /// # Errors
    ///
    /// - `ResourceNotFound` if the parent path cannot be resolved
    /// - `ResourceAlreadyExists` if the target is occupied and not a
    ///   collection that can absorb the value
    async fn create(&self, path: &str, value: Value) -> ProviderResult<()>;

    /// Deletes the value at `path`.
    async fn delete(&self, path: &str) -> ProviderResult<()>;

    /// Deletes the first element of the sequence at `path` equal to `value`.
    async fn delete_matching(&self, path: &str, value: Value) -> ProviderResult<()>;

    /// Invokes the operation at `path` with the given arguments.
    ///
    /// Arguments given as typed-value wrappers are collapsed before the
    /// call. A mapping target carrying an `invokable` child forwards the
    /// call one level down.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` if nothing invokable is found at `path`.
    async fn invoke(&self, path: &str, args: Vec<Value>) -> ProviderResult<Value>;
}

// =============================================================================
// VabModelProvider
// =============================================================================

/// Generic provider over one root value and one element handler.
pub struct VabModelProvider<H: ElementHandler> {
    root: Mutex<Option<Value>>,
    handler: H,
}

/// Provider over an in-memory mapping tree with the default composite
/// handler — the common case for hosting shells and sub-models.
pub type MapProvider = VabModelProvider<CompositeHandler>;

impl MapProvider {
    /// Creates a provider over a mapping tree with the composite handler.
    pub fn from_map(root: Value) -> Self {
        VabModelProvider::new(root, CompositeHandler::new())
    }
}

impl<H: ElementHandler> VabModelProvider<H> {
    /// Creates a provider with an initial root.
    pub fn new(root: Value, handler: H) -> Self {
        let root = handler.preprocess(root);
        Self {
            root: Mutex::new(Some(root)),
            handler,
        }
    }

    /// Creates a provider without a root; `create("")` initializes one.
    pub fn empty(handler: H) -> Self {
        Self {
            root: Mutex::new(None),
            handler,
        }
    }

    /// Resolves the parent of the addressed element, failing at the first
    /// unresolvable segment.
    fn resolve_parent_mut<'a>(
        &self,
        root: &'a mut Value,
        segments: &[&str],
    ) -> ProviderResult<&'a mut Value> {
        let mut current = root;
        for (i, segment) in segments.iter().take(segments.len().saturating_sub(1)).enumerate() {
            current = self
                .handler
                .property_of_mut(current, segment)
                .ok_or_else(|| unresolved(&segments[..=i]))?;
        }
        Ok(current)
    }

    /// Resolves the addressed element itself (read-only walk).
    fn resolve<'a>(&self, root: &'a Value, segments: &[&str]) -> ProviderResult<&'a Value> {
        let mut current = root;
        for (i, segment) in segments.iter().enumerate() {
            current = self
                .handler
                .property_of(current, segment)
                .ok_or_else(|| unresolved(&segments[..=i]))?;
        }
        Ok(current)
    }

    /// Resolves the operation addressed by `segments`, if any.
    fn resolve_operation(&self, root: &Value, segments: &[&str]) -> ProviderResult<Operation> {
        let target = self.resolve(root, segments)?;
        match target {
            Value::Invokable(op) => Ok(op.clone()),
            Value::Map(map) => match map.get(INVOKABLE_KEY) {
                Some(Value::Invokable(op)) => Ok(op.clone()),
                _ => Err(ProviderError::not_found(format!(
                    "no invokable operation at '{}'",
                    path::join(segments)
                ))),
            },
            _ => Err(ProviderError::not_found(format!(
                "no invokable operation at '{}'",
                path::join(segments)
            ))),
        }
    }
}

fn unresolved(prefix: &[&str]) -> ProviderError {
    ProviderError::not_found(format!("path segment '{}' does not exist", path::join(prefix)))
}

fn no_root() -> ProviderError {
    ProviderError::not_found("model root is not initialized".to_string())
}

#[async_trait]
impl<H: ElementHandler> ModelProvider for VabModelProvider<H> {
    async fn read(&self, path: &str) -> ProviderResult<Value> {
        let segments = path::split(path);
        let guard = self.root.lock();
        let root = guard.as_ref().ok_or_else(no_root)?;
        let value = self.resolve(root, &segments)?.clone();
        Ok(self.handler.postprocess(value))
    }

    async fn write(&self, path: &str, value: Value) -> ProviderResult<()> {
        let segments = path::split(path);
        let value = self.handler.preprocess(value.unwrap_typed());
        let mut guard = self.root.lock();

        if segments.is_empty() {
            // Replace the root only if one exists; write never creates.
            if guard.is_some() {
                *guard = Some(value);
            }
            return Ok(());
        }

        let root = match guard.as_mut() {
            Some(root) => root,
            None => return Ok(()),
        };
        let last = segments[segments.len() - 1];
        let parent = match self.resolve_parent_mut(root, &segments) {
            Ok(parent) => parent,
            // Silent no-op on a missing parent, mirroring the missing-target
            // case below (documented compatibility choice).
            Err(_) => return Ok(()),
        };
        if self.handler.property_of(parent, last).is_none() {
            return Ok(());
        }
        self.handler.set_property(parent, last, value)
    }

    async fn create(&self, path: &str, value: Value) -> ProviderResult<()> {
        let segments = path::split(path);
        let value = self.handler.preprocess(value.unwrap_typed());
        let mut guard = self.root.lock();

        if segments.is_empty() {
            if guard.is_some() {
                return Err(ProviderError::already_exists(
                    "model root already exists".to_string(),
                ));
            }
            *guard = Some(value);
            return Ok(());
        }

        let root = guard.as_mut().ok_or_else(no_root)?;
        let last = segments[segments.len() - 1];
        let parent = self.resolve_parent_mut(root, &segments)?;
        self.handler.create_property(parent, last, value)
    }

    async fn delete(&self, path: &str) -> ProviderResult<()> {
        let segments = path::split(path);
        if segments.is_empty() {
            return Err(ProviderError::malformed(
                "cannot delete the model root".to_string(),
            ));
        }
        let mut guard = self.root.lock();
        let root = guard.as_mut().ok_or_else(no_root)?;
        let last = segments[segments.len() - 1];
        let parent = self.resolve_parent_mut(root, &segments)?;
        self.handler.delete_property(parent, last)
    }

    async fn delete_matching(&self, path: &str, value: Value) -> ProviderResult<()> {
        let segments = path::split(path);
        let value = value.unwrap_typed();
        let mut guard = self.root.lock();
        let root = guard.as_mut().ok_or_else(no_root)?;

        let target = {
            let mut current = &mut *root;
            for (i, segment) in segments.iter().enumerate() {
                current = self
                    .handler
                    .property_of_mut(current, segment)
                    .ok_or_else(|| unresolved(&segments[..=i]))?;
            }
            current
        };
        self.handler.remove_matching(target, &value)
    }

    async fn invoke(&self, path: &str, args: Vec<Value>) -> ProviderResult<Value> {
        let segments = path::split(path);
        let args = unwrap_arguments(args);

        // Resolve under the lock, call outside it: operations may be slow
        // and must not block other accessors of the tree.
        let operation = {
            let guard = self.root.lock();
            let root = guard.as_ref().ok_or_else(no_root)?;
            self.resolve_operation(root, &segments)?
        };
        operation.call(&args)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_map;

    fn provider() -> MapProvider {
        MapProvider::from_map(value_map! {
            "idShort" => "sm1",
            "temp" => value_map! { "value" => 21.5f64 },
            "rows" => Value::Array(vec![Value::Int(1), Value::Int(2)]),
        })
    }

    #[tokio::test]
    async fn test_read_root_and_nested() {
        let p = provider();
        let root = p.read("").await.unwrap();
        assert_eq!(root.as_map().unwrap().get("idShort"), Some(&Value::Str("sm1".into())));

        assert_eq!(p.read("/temp/value").await.unwrap(), Value::Float(21.5));
        assert_eq!(p.read("rows/1").await.unwrap(), Value::Int(2));
    }

    #[tokio::test]
    async fn test_read_missing_fails_not_found() {
        let p = provider();
        assert!(p.read("temp/missing").await.unwrap_err().is_not_found());
        assert!(p.read("nope/deeper/path").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_write_replaces_existing() {
        let p = provider();
        p.write("temp/value", Value::Float(22.0)).await.unwrap();
        assert_eq!(p.read("temp/value").await.unwrap(), Value::Float(22.0));
    }

    #[tokio::test]
    async fn test_write_never_creates() {
        let p = provider();
        p.write("temp/new", Value::Int(1)).await.unwrap();
        assert!(p.read("temp/new").await.unwrap_err().is_not_found());

        // Missing parent is also a silent no-op.
        p.write("ghost/value", Value::Int(1)).await.unwrap();
        assert!(p.read("ghost").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_write_empty_path_replaces_root() {
        let p = provider();
        p.write("", value_map! { "fresh" => true }).await.unwrap();
        assert_eq!(p.read("fresh").await.unwrap(), Value::Bool(true));
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let p = provider();
        p.create("temp/unit", Value::Str("celsius".into())).await.unwrap();
        assert_eq!(p.read("temp/unit").await.unwrap(), Value::Str("celsius".into()));
    }

    #[tokio::test]
    async fn test_create_on_occupied_scalar_fails() {
        let p = provider();
        let err = p.create("idShort", Value::Str("other".into())).await.unwrap_err();
        assert_eq!(err.error_type(), "resource_already_exists");
    }

    #[tokio::test]
    async fn test_create_appends_into_collection() {
        let p = provider();
        p.create("rows", Value::Int(3)).await.unwrap();
        assert_eq!(
            p.read("rows").await.unwrap(),
            Value::Array(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
    }

    #[tokio::test]
    async fn test_create_missing_parent_fails() {
        let p = provider();
        let err = p.create("ghost/child", Value::Int(1)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_root_lifecycle() {
        let p = MapProvider::empty(CompositeHandler::new());
        assert!(p.read("").await.unwrap_err().is_not_found());

        // Write on an absent root is a no-op.
        p.write("", value_map! {}).await.unwrap();
        assert!(p.read("").await.unwrap_err().is_not_found());

        p.create("", value_map! { "x" => 1i64 }).await.unwrap();
        assert_eq!(p.read("x").await.unwrap(), Value::Int(1));

        let err = p.create("", value_map! {}).await.unwrap_err();
        assert_eq!(err.error_type(), "resource_already_exists");
    }

    #[tokio::test]
    async fn test_delete_then_read_fails() {
        let p = provider();
        p.delete("temp").await.unwrap();
        assert!(p.read("temp").await.unwrap_err().is_not_found());
        assert!(p.delete("temp").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_matching() {
        let p = provider();
        p.delete_matching("rows", Value::Int(1)).await.unwrap();
        assert_eq!(
            p.read("rows").await.unwrap(),
            Value::Array(vec![Value::Int(2)])
        );
        assert!(p
            .delete_matching("rows", Value::Int(9))
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_invoke_direct_and_forwarded() {
        let p = MapProvider::from_map(value_map! {
            "double" => Value::invokable(|args| {
                let x = args.first().and_then(Value::as_f64).unwrap_or_default();
                Ok(Value::Float(x * 2.0))
            }),
            "op" => value_map! {
                "idShort" => "op",
                "invokable" => Value::invokable(|_| Ok(Value::Str("ran".into()))),
            },
        });

        assert_eq!(
            p.invoke("double", vec![Value::Float(2.5)]).await.unwrap(),
            Value::Float(5.0)
        );
        // A mapping with an `invokable` child forwards the call.
        assert_eq!(
            p.invoke("op", vec![]).await.unwrap(),
            Value::Str("ran".into())
        );
    }

    #[tokio::test]
    async fn test_invoke_unwraps_typed_arguments() {
        let p = MapProvider::from_map(value_map! {
            "echo" => Value::invokable(|args| Ok(args.first().cloned().unwrap_or(Value::Null))),
        });

        let wrapped = value_map! { "valueType" => "double", "value" => 4.0f64 };
        assert_eq!(p.invoke("echo", vec![wrapped]).await.unwrap(), Value::Float(4.0));
    }

    #[tokio::test]
    async fn test_invoke_nothing_invokable_fails() {
        let p = provider();
        assert!(p.invoke("temp", vec![]).await.unwrap_err().is_not_found());
        assert!(p.invoke("missing", vec![]).await.unwrap_err().is_not_found());
    }
}

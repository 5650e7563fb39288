// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Asynchronous operation invocation.
//!
//! [`invoke_async`] starts an operation on its own tokio task immediately
//! and returns an [`InvocationHandle`] without blocking. The handle offers a
//! non-blocking poll (`is_finished`) and a blocking consume (`get_result`).
//! The worker publishes the result on a oneshot channel before flipping the
//! completion flag, so `is_finished() == true` guarantees that `get_result`
//! returns immediately.
//!
//! An operation's own failure is re-raised from `get_result` as
//! [`InvocationError::Operation`]; a worker that dies without reporting
//! (plumbing failure, not a modeled error) surfaces as
//! [`InvocationError::Lost`]. There is no cancellation: once invoked, an
//! operation runs to completion or failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::error::{ProviderError, ProviderResult};
use crate::provider::ModelProvider;
use crate::value::Value;

// =============================================================================
// InvocationError
// =============================================================================

/// Failure observed when consuming an asynchronous invocation.
#[derive(Debug, Error)]
pub enum InvocationError {
    /// The invoked operation itself failed.
    #[error("operation failed: {0}")]
    Operation(#[source] ProviderError),

    /// The invocation worker terminated before reporting a result.
    #[error("invocation worker terminated before reporting a result")]
    Lost,
}

impl InvocationError {
    /// Returns the underlying provider error if the operation itself failed.
    pub fn as_operation_error(&self) -> Option<&ProviderError> {
        match self {
            InvocationError::Operation(e) => Some(e),
            InvocationError::Lost => None,
        }
    }
}

// =============================================================================
// InvocationHandle
// =============================================================================

/// Future-like handle for one asynchronous operation call.
///
/// Terminal states are immutable: once finished, the handle stays finished
/// and the stored result never changes.
pub struct InvocationHandle {
    id: Uuid,
    finished: Arc<AtomicBool>,
    receiver: oneshot::Receiver<ProviderResult<Value>>,
}

impl InvocationHandle {
    /// Returns the unique id of this invocation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns `true` once the operation has reached a terminal state.
    ///
    /// Non-blocking and idempotent.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Waits for the terminal state and consumes the handle.
    ///
    /// Blocks (asynchronously) with no timeout; called after completion it
    /// returns immediately.
    pub async fn get_result(self) -> Result<Value, InvocationError> {
        match self.receiver.await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(error)) => Err(InvocationError::Operation(error)),
            Err(_) => Err(InvocationError::Lost),
        }
    }
}

/// Invokes the operation at `path` on a separate task and returns at once.
pub fn invoke_async(
    provider: Arc<dyn ModelProvider>,
    path: impl Into<String>,
    args: Vec<Value>,
) -> InvocationHandle {
    let id = Uuid::new_v4();
    let path = path.into();
    let finished = Arc::new(AtomicBool::new(false));
    let (sender, receiver) = oneshot::channel();

    let flag = finished.clone();
    tokio::spawn(async move {
        let result = provider.invoke(&path, args).await;
        // Publish the result first; the flag only flips once the value is
        // observable, so a true poll implies a non-blocking get_result.
        let _ = sender.send(result);
        flag.store(true, Ordering::Release);
    });

    InvocationHandle { id, finished, receiver }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MapProvider;
    use crate::value_map;
    use std::time::Duration;

    fn provider() -> Arc<dyn ModelProvider> {
        Arc::new(MapProvider::from_map(value_map! {
            "slow" => Value::invokable(|_| {
                std::thread::sleep(Duration::from_millis(50));
                Ok(Value::Int(42))
            }),
            "fails" => Value::invokable(|_| {
                Err(ProviderError::provider("boom".to_string()))
            }),
        }))
    }

    #[tokio::test]
    async fn test_completion_ordering() {
        let handle = invoke_async(provider(), "slow", vec![]);
        assert!(!handle.is_finished());

        let result = handle.get_result().await.unwrap();
        assert_eq!(result, Value::Int(42));
    }

    #[tokio::test]
    async fn test_finished_implies_immediate_result() {
        let handle = invoke_async(provider(), "slow", vec![]);
        while !handle.is_finished() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        // Already terminal: the result is available without waiting.
        assert_eq!(handle.get_result().await.unwrap(), Value::Int(42));
    }

    #[tokio::test]
    async fn test_async_matches_sync_invoke() {
        let p = provider();
        let sync = p.invoke("slow", vec![]).await.unwrap();
        let handle = invoke_async(p, "slow", vec![]);
        assert_eq!(handle.get_result().await.unwrap(), sync);
    }

    #[tokio::test]
    async fn test_operation_failure_is_re_raised() {
        let handle = invoke_async(provider(), "fails", vec![]);
        let err = handle.get_result().await.unwrap_err();
        let inner = err.as_operation_error().expect("operation failure");
        assert_eq!(inner.error_type(), "provider");
    }

    #[tokio::test]
    async fn test_missing_operation_fails_not_found() {
        let handle = invoke_async(provider(), "missing", vec![]);
        let err = handle.get_result().await.unwrap_err();
        assert!(err.as_operation_error().unwrap().is_not_found());
    }
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Mock implementations for testing components in isolation.
//!
//! - Recording of interactions for verification
//! - Thread-safe for concurrent testing
//! - Easy error injection

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use vab_core::error::{ProviderError, ProviderResult};
use vab_core::provider::ModelProvider;
use vab_core::Value;

// =============================================================================
// MockConnector
// =============================================================================

/// One recorded call against a [`MockConnector`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Operation name.
    pub op: &'static str,
    /// Addressed path as received.
    pub path: String,
}

/// A connector double that records every call and answers with a canned
/// value.
pub struct MockConnector {
    canned: Value,
    calls: Mutex<Vec<RecordedCall>>,
    fail_all: AtomicBool,
}

impl MockConnector {
    /// Creates a mock answering reads/invokes with `canned`.
    pub fn new(canned: Value) -> Arc<Self> {
        Arc::new(Self {
            canned,
            calls: Mutex::new(Vec::new()),
            fail_all: AtomicBool::new(false),
        })
    }

    /// Makes every subsequent call fail with a generic provider error.
    pub fn fail_all(&self, enabled: bool) {
        self.fail_all.store(enabled, Ordering::SeqCst);
    }

    /// Returns the calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    fn record(&self, op: &'static str, path: &str) -> ProviderResult<()> {
        self.calls.lock().push(RecordedCall {
            op,
            path: path.to_string(),
        });
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(ProviderError::provider("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for MockConnector {
    async fn read(&self, path: &str) -> ProviderResult<Value> {
        self.record("read", path)?;
        Ok(self.canned.clone())
    }

    async fn write(&self, path: &str, _value: Value) -> ProviderResult<()> {
        self.record("write", path)
    }

    async fn create(&self, path: &str, _value: Value) -> ProviderResult<()> {
        self.record("create", path)
    }

    async fn delete(&self, path: &str) -> ProviderResult<()> {
        self.record("delete", path)
    }

    async fn delete_matching(&self, path: &str, _value: Value) -> ProviderResult<()> {
        self.record("delete_matching", path)
    }

    async fn invoke(&self, path: &str, _args: Vec<Value>) -> ProviderResult<Value> {
        self.record("invoke", path)?;
        Ok(self.canned.clone())
    }
}

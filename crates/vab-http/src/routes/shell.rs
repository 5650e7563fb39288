// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Shell namespace routes.
//!
//! Verb mapping of the HTTP binding:
//!
//! | Verb   | Operation                                      |
//! |--------|------------------------------------------------|
//! | GET    | `read`                                         |
//! | PUT    | `write`                                        |
//! | POST   | `create`; a trailing `/invoke` segment selects `invoke` on the element path |
//! | DELETE | `delete`                                       |
//! | PATCH  | `delete_matching` (partial update of a collection-valued property) |
//!
//! Replies ride the shared result envelope. Because the `invoke` suffix is
//! part of the verb convention, a property literally named `invoke` cannot
//! be created through this binding.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use vab_core::path;
use vab_core::provider::ModelProvider;
use vab_core::routing::SHELL_SEGMENT;
use vab_core::wire::{ResultEnvelope, INVOKE_SUFFIX};
use vab_core::Value;

use crate::error::ApiResult;
use crate::state::AppState;

/// Builds the `/shell` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/shell",
            get(read_root).put(write_root).post(create_root).delete(delete_root),
        )
        .route(
            "/shell/{*path}",
            get(read_element)
                .put(write_element)
                .post(post_element)
                .delete(delete_element)
                .patch(patch_element),
        )
}

fn shell_path(rest: &str) -> String {
    path::concat([SHELL_SEGMENT, rest])
}

/// Interprets a POST body as an invocation argument list.
fn into_args(body: Value) -> Vec<Value> {
    match body {
        Value::Array(args) => args,
        Value::Null => Vec::new(),
        single => vec![single],
    }
}

// =============================================================================
// Root handlers
// =============================================================================

async fn read_root(State(state): State<AppState>) -> ApiResult<Json<ResultEnvelope<Value>>> {
    let value = state.provider.read(SHELL_SEGMENT).await?;
    Ok(Json(ResultEnvelope::ok(value)))
}

async fn write_root(
    State(state): State<AppState>,
    Json(value): Json<Value>,
) -> ApiResult<Json<ResultEnvelope<Value>>> {
    state.provider.write(SHELL_SEGMENT, value).await?;
    Ok(Json(ResultEnvelope::empty()))
}

async fn create_root(
    State(state): State<AppState>,
    Json(value): Json<Value>,
) -> ApiResult<Json<ResultEnvelope<Value>>> {
    state.provider.create(SHELL_SEGMENT, value).await?;
    Ok(Json(ResultEnvelope::empty()))
}

async fn delete_root(State(state): State<AppState>) -> ApiResult<Json<ResultEnvelope<Value>>> {
    state.provider.delete(SHELL_SEGMENT).await?;
    Ok(Json(ResultEnvelope::empty()))
}

// =============================================================================
// Element handlers
// =============================================================================

async fn read_element(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> ApiResult<Json<ResultEnvelope<Value>>> {
    let value = state.provider.read(&shell_path(&rest)).await?;
    Ok(Json(ResultEnvelope::ok(value)))
}

async fn write_element(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    Json(value): Json<Value>,
) -> ApiResult<Json<ResultEnvelope<Value>>> {
    state.provider.write(&shell_path(&rest), value).await?;
    Ok(Json(ResultEnvelope::empty()))
}

async fn post_element(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ResultEnvelope<Value>>> {
    let full = shell_path(&rest);
    if path::last_segment(&full) == Some(INVOKE_SUFFIX) {
        let element = path::drop_last_segment(&full);
        let result = state.provider.invoke(&element, into_args(body)).await?;
        return Ok(Json(ResultEnvelope::ok(result)));
    }
    state.provider.create(&full, body).await?;
    Ok(Json(ResultEnvelope::empty()))
}

async fn delete_element(
    State(state): State<AppState>,
    Path(rest): Path<String>,
) -> ApiResult<Json<ResultEnvelope<Value>>> {
    state.provider.delete(&shell_path(&rest)).await?;
    Ok(Json(ResultEnvelope::empty()))
}

async fn patch_element(
    State(state): State<AppState>,
    Path(rest): Path<String>,
    Json(value): Json<Value>,
) -> ApiResult<Json<ResultEnvelope<Value>>> {
    state.provider.delete_matching(&shell_path(&rest), value).await?;
    Ok(Json(ResultEnvelope::empty()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_path_joins_canonically() {
        assert_eq!(shell_path("submodels/sm1"), "shell/submodels/sm1");
        assert_eq!(shell_path(""), "shell");
    }

    #[test]
    fn test_into_args() {
        assert_eq!(into_args(Value::Null), Vec::<Value>::new());
        assert_eq!(
            into_args(Value::Array(vec![Value::Int(1)])),
            vec![Value::Int(1)]
        );
        assert_eq!(into_args(Value::Int(7)), vec![Value::Int(7)]);
    }
}

// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Registry REST surface.
//!
//! | Route                 | Operation                              |
//! |-----------------------|----------------------------------------|
//! | `GET /registry`       | list all; `?tags=a,b` filters by tag intersection |
//! | `GET /registry/{id}`  | lookup                                 |
//! | `POST /registry`      | register (caller guarantees a fresh id) |
//! | `PUT /registry/{id}`  | register/replace wholesale             |
//! | `DELETE /registry/{id}` | delete, including tag-index entries  |
//!
//! Descriptor JSON is the wire contract between registry client and server;
//! it passes through this surface unmodified.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use vab_registry::descriptor::ShellDescriptor;
use vab_registry::registry::{Registry, TaggedDirectory};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Builds the `/registry` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registry", get(list_descriptors).post(register_descriptor))
        .route(
            "/registry/{id}",
            get(lookup_descriptor)
                .put(replace_descriptor)
                .delete(delete_descriptor),
        )
}

/// Query parameters of the list endpoint.
#[derive(Debug, Deserialize)]
struct ListQuery {
    /// Comma-separated tag filter; intersection semantics.
    tags: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn list_descriptors(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<ShellDescriptor>>> {
    let registry = state.registry()?;
    let descriptors = match query.tags {
        Some(raw) => {
            let tags: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            registry.lookup_by_tags(&tags).await?
        }
        None => registry.lookup_all().await?,
    };
    Ok(Json(descriptors))
}

async fn lookup_descriptor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ShellDescriptor>> {
    let descriptor = state.registry()?.lookup(&id).await?;
    Ok(Json(descriptor))
}

async fn register_descriptor(
    State(state): State<AppState>,
    Json(descriptor): Json<ShellDescriptor>,
) -> ApiResult<StatusCode> {
    state.registry()?.register_only(descriptor).await?;
    Ok(StatusCode::CREATED)
}

async fn replace_descriptor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(descriptor): Json<ShellDescriptor>,
) -> ApiResult<StatusCode> {
    if descriptor.id() != id {
        return Err(ApiError::bad_request(format!(
            "path id '{id}' does not match descriptor id '{}'",
            descriptor.id()
        )));
    }
    state.registry()?.register(descriptor).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_descriptor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.registry()?.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

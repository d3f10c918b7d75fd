// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Handlers shared by every owned entity type.
//!
//! Route modules mount these with a concrete record type, e.g.
//! `post(handlers::create::<SoilProfile>)`. The path parameter is the owner
//! key for create/list and singleton routes, and the record key otherwise.

use super::extract::ValidatedJson;
use crate::db::{OwnedRecord, Record};
use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use validator::Validate;

/// `POST` on an owner collection.
pub async fn create<R>(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<String>,
    ValidatedJson(body): ValidatedJson<R::Create>,
) -> Result<(StatusCode, Json<R>)>
where
    R: OwnedRecord + Serialize,
    R::Create: DeserializeOwned + Validate,
{
    let record = state.repo::<R>().create(&owner_id, &body).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET` on an owner collection.
pub async fn list<R>(
    State(state): State<Arc<AppState>>,
    Path(owner_id): Path<String>,
) -> Result<Json<Vec<R>>>
where
    R: OwnedRecord + Serialize,
{
    let records = state.repo::<R>().list_by_owner(&owner_id).await?;
    Ok(Json(records))
}

/// `GET` by record key (or by owner key for singleton profiles).
pub async fn get_one<R>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<R>>
where
    R: Record + Serialize,
{
    Ok(Json(state.repo::<R>().get(&id).await?))
}

/// `PATCH` by record key (or by owner key for singleton profiles).
pub async fn update<R>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<R::Patch>,
) -> Result<Json<R>>
where
    R: Record + Serialize,
    R::Patch: DeserializeOwned + Validate,
{
    Ok(Json(state.repo::<R>().update(&id, &patch).await?))
}

/// `DELETE` by record key. Children are not removed.
pub async fn delete<R>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode>
where
    R: Record,
{
    state.repo::<R>().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

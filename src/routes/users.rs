// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account routes.

use super::extract::ValidatedJson;
use super::handlers;
use crate::error::Result;
use crate::models::{FullProfile, LoginRequest, RegisterRequest, User};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/", get(list_users))
        .route(
            "/api/users/{user_id}",
            get(handlers::get_one::<User>)
                .patch(handlers::update::<User>)
                .delete(handlers::delete::<User>),
        )
        .route("/api/users/{user_id}/profile/deep", get(deep_profile))
}

/// Register a farmer account.
async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = state.accounts().register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Phone + password login. No session is issued.
async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<User>> {
    Ok(Json(state.accounts().login(request).await?))
}

async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<User>>> {
    let users = state.repo::<User>().list_all().await?;
    tracing::debug!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// User, finance records, alerts and every farm with its profiles and
/// histories, in one response.
async fn deep_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<FullProfile>> {
    Ok(Json(state.profiles().fetch(&user_id).await?))
}

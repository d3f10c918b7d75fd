// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Many-per-farm records: soil tests, activity logs and chat history.

use super::extract::ValidatedJson;
use super::handlers;
use crate::error::Result;
use crate::models::{ActivityLog, ChatAttributes, ChatMessage, Farm, SoilProfile};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/farms/{farm_id}/soil-profiles/",
            get(handlers::list::<SoilProfile>).post(handlers::create::<SoilProfile>),
        )
        .route(
            "/api/soil-profiles/{soil_id}",
            get(handlers::get_one::<SoilProfile>).patch(handlers::update::<SoilProfile>),
        )
        .route(
            "/api/farms/{farm_id}/logs/",
            get(handlers::list::<ActivityLog>).post(handlers::create::<ActivityLog>),
        )
        .route(
            "/api/logs/{log_id}",
            get(handlers::get_one::<ActivityLog>).patch(handlers::update::<ActivityLog>),
        )
        .route(
            "/api/farms/{farm_id}/chats/",
            get(list_chats).post(create_chat),
        )
        .route(
            "/api/chats/{chat_id}",
            get(handlers::get_one::<ChatMessage>).patch(handlers::update::<ChatMessage>),
        )
}

/// Chats are the one farm child that refuses a missing parent farm.
async fn require_farm(state: &AppState, farm_id: &str) -> Result<()> {
    state.repo::<Farm>().get(farm_id).await.map(|_| ())
}

async fn create_chat(
    State(state): State<Arc<AppState>>,
    Path(farm_id): Path<String>,
    ValidatedJson(body): ValidatedJson<ChatAttributes>,
) -> Result<(StatusCode, Json<ChatMessage>)> {
    // An owner mismatch is reported by create() ahead of a missing farm
    if body.farm_id == farm_id {
        require_farm(&state, &farm_id).await?;
    }
    let message = state.repo::<ChatMessage>().create(&farm_id, &body).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

async fn list_chats(
    State(state): State<Arc<AppState>>,
    Path(farm_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>> {
    require_farm(&state, &farm_id).await?;
    Ok(Json(state.repo::<ChatMessage>().list_by_owner(&farm_id).await?))
}

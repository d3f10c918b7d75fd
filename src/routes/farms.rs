// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Farm routes and the per-farm singleton profiles (crop, resources,
//! challenges).

use super::handlers;
use crate::models::{CropProfile, Farm, FarmChallengeProfile, FarmResourceProfile};
use crate::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/{user_id}/farms/",
            get(handlers::list::<Farm>).post(handlers::create::<Farm>),
        )
        .route(
            "/api/farms/{farm_id}",
            get(handlers::get_one::<Farm>)
                .patch(handlers::update::<Farm>)
                .delete(handlers::delete::<Farm>),
        )
        // Singleton profiles live at the farm key; POST replaces
        .route(
            "/api/farms/{farm_id}/crops/",
            get(handlers::get_one::<CropProfile>)
                .post(handlers::create::<CropProfile>)
                .patch(handlers::update::<CropProfile>),
        )
        .route(
            "/api/farms/{farm_id}/resources/",
            get(handlers::get_one::<FarmResourceProfile>)
                .post(handlers::create::<FarmResourceProfile>)
                .patch(handlers::update::<FarmResourceProfile>),
        )
        .route(
            "/api/farms/{farm_id}/challenges/",
            get(handlers::get_one::<FarmChallengeProfile>)
                .post(handlers::create::<FarmChallengeProfile>)
                .patch(handlers::update::<FarmChallengeProfile>),
        )
}

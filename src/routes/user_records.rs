// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Records owned directly by a user: resource and challenge profiles,
//! alerts, and finance records.

use super::handlers;
use crate::models::{Alert, FinanceRecord, UserChallengeProfile, UserResourceProfile};
use crate::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/users/{user_id}/resources/",
            get(handlers::get_one::<UserResourceProfile>)
                .post(handlers::create::<UserResourceProfile>)
                .patch(handlers::update::<UserResourceProfile>),
        )
        .route(
            "/api/users/{user_id}/challenges/",
            get(handlers::get_one::<UserChallengeProfile>)
                .post(handlers::create::<UserChallengeProfile>)
                .patch(handlers::update::<UserChallengeProfile>),
        )
        .route(
            "/api/users/{user_id}/alerts/",
            get(handlers::list::<Alert>).post(handlers::create::<Alert>),
        )
        .route(
            "/api/alerts/{alert_id}",
            get(handlers::get_one::<Alert>).patch(handlers::update::<Alert>),
        )
        .route(
            "/api/users/{user_id}/finance/",
            get(handlers::list::<FinanceRecord>).post(handlers::create::<FinanceRecord>),
        )
        .route(
            "/api/finance/{finance_id}",
            get(handlers::get_one::<FinanceRecord>).patch(handlers::update::<FinanceRecord>),
        )
}

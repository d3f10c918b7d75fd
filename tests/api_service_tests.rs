// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Service endpoints, error body shape and store failure handling.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{create_offline_app, create_test_app, json_body, send};

#[tokio::test]
async fn test_root_and_health() {
    let (app, _state) = create_test_app();

    let response = send(&app, "GET", "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().contains("Krishi Sakhi"));

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["build_id"].is_string());
}

#[tokio::test]
async fn test_store_failure_hides_details() {
    let (app, _state) = create_offline_app();

    let response = send(&app, "GET", "/api/users/", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": "database_error" }));
}

#[tokio::test]
async fn test_store_failure_on_deep_profile() {
    let (app, _state) = create_offline_app();
    let response = send(&app, "GET", "/api/users/u-1/profile/deep", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_validation_runs_before_store() {
    // Offline store: reaching it would be a 500, so 400 proves the body was
    // rejected first
    let (app, _state) = create_offline_app();
    let response = send(
        &app,
        "POST",
        "/api/users/u-1/alerts/",
        Some(json!({ "userId": "u-1", "alertType": "weather" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _state) = create_test_app();
    let response = send(&app, "GET", "/api/unknown", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

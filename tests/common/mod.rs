// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response};
use krishi_sakhi::config::Config;
use krishi_sakhi::db::{DocumentStore, FirestoreDb, MemoryDb};
use krishi_sakhi::error::AppError;
use krishi_sakhi::models::Language;
use krishi_sakhi::routes::create_router;
use krishi_sakhi::services::{SpeechGateway, SpeechSynthesizer};
use krishi_sakhi::AppState;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project", Duration::from_secs(10))
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Speech client that returns a fake MP3 payload naming the voice.
#[allow(dead_code)]
pub struct FakeSynthesizer;

#[async_trait]
impl SpeechSynthesizer for FakeSynthesizer {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, AppError> {
        Ok(format!("ID3|{}|{}", language.voice_name(), text).into_bytes())
    }
}

#[allow(dead_code)]
fn build_app(
    store: Arc<dyn DocumentStore>,
    speech: SpeechGateway,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), store, speech));
    (create_router(state.clone()), state)
}

/// Create a test app on an empty in-memory store with a fake speech client.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let speech = SpeechGateway::with_client(Arc::new(FakeSynthesizer), Duration::from_secs(5));
    build_app(Arc::new(MemoryDb::new()), speech)
}

/// Test app whose speech gateway never initialised.
#[allow(dead_code)]
pub fn create_test_app_without_tts() -> (axum::Router, Arc<AppState>) {
    build_app(
        Arc::new(MemoryDb::new()),
        SpeechGateway::unavailable(Duration::from_secs(5)),
    )
}

/// Test app on an offline Firestore client: every store call fails.
#[allow(dead_code)]
pub fn create_offline_app() -> (axum::Router, Arc<AppState>) {
    build_app(
        Arc::new(FirestoreDb::new_mock()),
        SpeechGateway::unavailable(Duration::from_secs(5)),
    )
}

/// Send one request through a clone of the router.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return its JSON representation.
#[allow(dead_code)]
pub async fn register_user(app: &axum::Router, phone: &str) -> Value {
    let response = send(
        app,
        "POST",
        "/api/users/register",
        Some(serde_json::json!({
            "fullName": "Test Farmer",
            "phone": phone,
            "password": "test-password",
        })),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    json_body(response).await
}

/// Create a farm for `user_id` and return its JSON representation.
#[allow(dead_code)]
pub async fn create_farm(app: &axum::Router, user_id: &str, village: &str) -> Value {
    let response = send(
        app,
        "POST",
        &format!("/api/users/{}/farms/", user_id),
        Some(serde_json::json!({ "userId": user_id, "village": village })),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    json_body(response).await
}

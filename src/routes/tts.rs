// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text-to-speech route.

use super::extract::ValidatedJson;
use crate::error::Result;
use crate::models::SynthesizeRequest;
use crate::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::post,
    Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/tts/synthesize", post(synthesize))
}

/// Convert text to MP3 audio in one of the supported languages.
async fn synthesize(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<SynthesizeRequest>,
) -> Result<impl IntoResponse> {
    let audio = state
        .speech
        .synthesize(&request.text, request.language)
        .await?;

    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text-to-speech pass-through to Google Cloud Text-to-Speech.
//!
//! The client is built once at startup from a dedicated service-account
//! file. If that fails the gateway stays unavailable until restart.

use crate::config::Config;
use crate::error::AppError;
use crate::models::Language;
use async_trait::async_trait;
use gcloud_sdk::google::cloud::texttospeech::v1::{
    synthesis_input::InputSource, text_to_speech_client::TextToSpeechClient, AudioConfig,
    AudioEncoding, SynthesisInput, SynthesizeSpeechRequest, VoiceSelectionParams,
};
use gcloud_sdk::{GoogleApi, GoogleAuthMiddleware, TokenSourceType, GCP_DEFAULT_SCOPES};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const TEXT_TO_SPEECH_API: &str = "https://texttospeech.googleapis.com";

/// Something that turns text into MP3 bytes.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, AppError>;
}

/// Google Cloud Text-to-Speech over gRPC.
pub struct GoogleSpeechClient {
    api: GoogleApi<TextToSpeechClient<GoogleAuthMiddleware>>,
}

impl GoogleSpeechClient {
    pub async fn new(credentials_path: &Path) -> Result<Self, AppError> {
        let api = GoogleApi::from_function_with_token_source(
            TextToSpeechClient::new,
            TEXT_TO_SPEECH_API,
            None,
            GCP_DEFAULT_SCOPES.clone(),
            TokenSourceType::File(credentials_path.to_path_buf()),
        )
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to create Text-to-Speech client: {}",
                e
            ))
        })?;

        Ok(Self { api })
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeechClient {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, AppError> {
        let request = SynthesizeSpeechRequest {
            input: Some(SynthesisInput {
                input_source: Some(InputSource::Text(text.to_string())),
                ..Default::default()
            }),
            voice: Some(VoiceSelectionParams {
                language_code: language.locale().to_string(),
                name: language.voice_name().to_string(),
                ..Default::default()
            }),
            audio_config: Some(AudioConfig {
                audio_encoding: AudioEncoding::Mp3 as i32,
                ..Default::default()
            }),
            ..Default::default()
        };

        let response = self
            .api
            .get()
            .synthesize_speech(request)
            .await
            .map_err(|status| {
                AppError::Internal(anyhow::anyhow!("Text-to-Speech call failed: {}", status))
            })?;

        Ok(response.into_inner().audio_content)
    }
}

/// Availability and timeout policy around a [`SpeechSynthesizer`].
#[derive(Clone)]
pub struct SpeechGateway {
    client: Option<Arc<dyn SpeechSynthesizer>>,
    timeout: Duration,
}

impl SpeechGateway {
    /// Build the gateway from configuration. Never fails: a missing or
    /// broken credentials file leaves the gateway unavailable.
    pub async fn connect(config: &Config) -> Self {
        let Some(path) = config.tts_credentials_path.as_deref() else {
            tracing::warn!("TTS_CREDENTIALS_PATH not set, text-to-speech unavailable");
            return Self::unavailable(config.tts_timeout);
        };

        match GoogleSpeechClient::new(path).await {
            Ok(client) => {
                tracing::info!(path = %path.display(), "Text-to-Speech client initialized");
                Self::with_client(Arc::new(client), config.tts_timeout)
            }
            Err(e) => {
                tracing::error!(error = %e, path = %path.display(), "Text-to-Speech init failed");
                Self::unavailable(config.tts_timeout)
            }
        }
    }

    pub fn unavailable(timeout: Duration) -> Self {
        Self {
            client: None,
            timeout,
        }
    }

    pub fn with_client(client: Arc<dyn SpeechSynthesizer>, timeout: Duration) -> Self {
        Self {
            client: Some(client),
            timeout,
        }
    }

    pub fn is_available(&self) -> bool {
        self.client.is_some()
    }

    /// Synthesize `text` as MP3. One attempt, no retry.
    pub async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>, AppError> {
        let client = self.client.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable(
                "Text-to-Speech service is currently unavailable.".to_string(),
            )
        })?;

        let audio = tokio::time::timeout(self.timeout, client.synthesize(text, language))
            .await
            .map_err(|_| {
                AppError::Internal(anyhow::anyhow!(
                    "Text-to-Speech call timed out after {:?}",
                    self.timeout
                ))
            })??;

        tracing::debug!(
            language = language.locale(),
            chars = text.chars().count(),
            bytes = audio.len(),
            "Speech synthesized"
        );
        Ok(audio)
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Text-to-speech request types.

use serde::Deserialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Languages the speech endpoint can voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Marathi,
    Malayalam,
}

impl Language {
    /// BCP-47 locale passed to the speech provider.
    pub fn locale(self) -> &'static str {
        match self {
            Language::English => "en-IN",
            Language::Hindi => "hi-IN",
            Language::Marathi => "mr-IN",
            Language::Malayalam => "ml-IN",
        }
    }

    /// Provider voice name for this language.
    pub fn voice_name(self) -> &'static str {
        match self {
            Language::English => "en-IN-Wavenet-A",
            Language::Hindi => "hi-IN-Wavenet-A",
            Language::Marathi => "mr-IN-Wavenet-A",
            Language::Malayalam => "ml-IN-Wavenet-A",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SynthesizeRequest {
    #[validate(length(min = 1, max = 5000))]
    pub text: String,
    pub language: Language,
}

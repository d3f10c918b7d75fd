// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod password;
pub mod profile;
pub mod speech;

pub use accounts::UserAccounts;
pub use profile::ProfileAggregator;
pub use speech::{GoogleSpeechClient, SpeechGateway, SpeechSynthesizer};

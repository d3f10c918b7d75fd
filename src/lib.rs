// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Krishi Sakhi: farm records backend
//!
//! This crate provides the REST API behind the Krishi Sakhi farming
//! assistant: farmer accounts, farms and their profiles, activity logs,
//! chat history, alerts, finance records, and a text-to-speech pass-through.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::{DocumentStore, Record, Repository};
use services::{ProfileAggregator, SpeechGateway, UserAccounts};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn DocumentStore>,
    pub speech: SpeechGateway,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn DocumentStore>, speech: SpeechGateway) -> Self {
        Self {
            config,
            store,
            speech,
        }
    }

    /// Repository for one entity type over the shared store.
    pub fn repo<R: Record>(&self) -> Repository<R> {
        Repository::new(self.store.clone())
    }

    pub fn accounts(&self) -> UserAccounts {
        UserAccounts::new(self.store.clone())
    }

    pub fn profiles(&self) -> ProfileAggregator {
        ProfileAggregator::new(self.store.clone())
    }
}

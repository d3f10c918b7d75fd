// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and phone/password login.

use crate::db::{collections, to_document, Document, DocumentStore, FieldFilter, Repository};
use crate::error::{AppError, Result};
use crate::models::user::{
    CREATED_AT_FIELD, LAST_LOGIN_FIELD, PASSWORD_HASH_FIELD, PHONE_FIELD,
};
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::services::password::{hash_password_blocking, verify_password_blocking};
use crate::time_utils::now_rfc3339;
use serde_json::Value;
use std::sync::Arc;

/// User account operations that touch credentials.
#[derive(Clone)]
pub struct UserAccounts {
    store: Arc<dyn DocumentStore>,
    users: Repository<User>,
}

impl UserAccounts {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: Repository::new(store.clone()),
            store,
        }
    }

    /// Register a new user.
    ///
    /// The phone uniqueness check is a read before the insert; two
    /// concurrent registrations with the same phone can both succeed.
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        let existing = self
            .store
            .query(
                collections::USERS,
                Some(FieldFilter::eq(PHONE_FIELD, request.profile.phone.clone())),
                None,
                Some(1),
            )
            .await?;
        if !existing.is_empty() {
            tracing::info!("Registration rejected, phone already in use");
            return Err(AppError::Conflict(
                "User with this phone number already exists.".to_string(),
            ));
        }

        let hash = hash_password_blocking(request.password.clone()).await?;

        let mut fields = to_document(&request)?;
        let now = now_rfc3339();
        fields.insert(PASSWORD_HASH_FIELD.to_string(), Value::String(hash));
        fields.insert(CREATED_AT_FIELD.to_string(), Value::String(now.clone()));
        fields.insert(LAST_LOGIN_FIELD.to_string(), Value::String(now));

        let id = self.store.add(collections::USERS, &fields).await?;
        tracing::info!(user_id = %id, "User registered");

        self.users.get(&id).await
    }

    /// Verify credentials and stamp `lastLogin`.
    pub async fn login(&self, request: LoginRequest) -> Result<User> {
        let doc = self
            .store
            .query(
                collections::USERS,
                Some(FieldFilter::eq(PHONE_FIELD, request.phone)),
                None,
                Some(1),
            )
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                AppError::NotFound("User with this phone number not found".to_string())
            })?;

        let stored_hash = doc
            .fields
            .get(PASSWORD_HASH_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if !verify_password_blocking(request.password, stored_hash).await? {
            tracing::info!(user_id = %doc.id, "Login failed, password mismatch");
            return Err(AppError::Unauthorized("Incorrect password".to_string()));
        }

        let mut stamp = Document::new();
        stamp.insert(LAST_LOGIN_FIELD.to_string(), Value::String(now_rfc3339()));
        self.store.update(collections::USERS, &doc.id, &stamp).await?;
        tracing::info!(user_id = %doc.id, "User logged in");

        self.users.get(&doc.id).await
    }
}

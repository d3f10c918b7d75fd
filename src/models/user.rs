// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Farmer account model.

use crate::db::{collections, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored field holding the Argon2 PHC string. Never returned by the API.
pub const PASSWORD_HASH_FIELD: &str = "hashedPassword";
pub const PHONE_FIELD: &str = "phone";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const LAST_LOGIN_FIELD: &str = "lastLogin";

fn default_language() -> Option<String> {
    Some("Malayalam".to_string())
}

/// Profile attributes supplied at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileFields {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    /// Unique per user; used as the login identifier
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    #[serde(default = "default_language")]
    pub preferred_language: Option<String>,
    pub education_level: Option<String>,
    pub farming_experience_years: Option<u32>,
}

/// Registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub profile: UserProfileFields,
    #[serde(skip_serializing)]
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Login body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// User as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(flatten)]
    pub profile: UserProfileFields,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Partial profile update. Phone number and password are not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub age: Option<Option<u32>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub gender: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub preferred_language: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub education_level: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub farming_experience_years: Option<Option<u32>>,
}

impl Record for User {
    const COLLECTION: &'static str = collections::USERS;
    const NAME: &'static str = "User";
    type Patch = UserUpdate;
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resource profiles (machinery, labour, inputs, storage).
//!
//! The same resource fields are tracked at two owner scopes, each a separate
//! singleton type in its own collection: per farm ([`FarmResourceProfile`],
//! keyed by farm id) and per user ([`UserResourceProfile`], keyed by user id).

use crate::db::{collections, KeyStrategy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Free-form application record, e.g. `{"product": "urea", "kg": 50}`.
pub type InputApplication = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFields {
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub machinery: Vec<String>,
    pub labor_availability: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub fertilizer_history: Vec<InputApplication>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub pesticide_history: Vec<InputApplication>,
    pub storage_access: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmResourceAttributes {
    pub farm_id: String,
    #[serde(flatten)]
    pub resources: ResourceFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserResourceAttributes {
    pub user_id: String,
    #[serde(flatten)]
    pub resources: ResourceFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FarmResourceProfile {
    /// Same as `farm_id`
    pub id: String,
    pub farm_id: String,
    #[serde(flatten)]
    pub resources: ResourceFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct UserResourceProfile {
    /// Same as `user_id`
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub resources: ResourceFields,
    pub created_at: DateTime<Utc>,
}

/// Partial update, shared by both scopes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machinery: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub labor_availability: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fertilizer_history: Option<Vec<InputApplication>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pesticide_history: Option<Vec<InputApplication>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_access: Option<Option<String>>,
}

impl Record for FarmResourceProfile {
    const COLLECTION: &'static str = collections::RESOURCES;
    const NAME: &'static str = "Resource profile";
    type Patch = ResourceUpdate;
}

impl OwnedRecord for FarmResourceProfile {
    const OWNER_FIELD: &'static str = "farmId";
    const KEY: KeyStrategy = KeyStrategy::Owner;
    const CREATED_AT: Option<&'static str> = Some("createdAt");
    type Create = FarmResourceAttributes;

    fn owner_of(create: &FarmResourceAttributes) -> &str {
        &create.farm_id
    }
}

impl Record for UserResourceProfile {
    const COLLECTION: &'static str = collections::USER_RESOURCES;
    const NAME: &'static str = "Resource profile";
    type Patch = ResourceUpdate;
}

impl OwnedRecord for UserResourceProfile {
    const OWNER_FIELD: &'static str = "userId";
    const KEY: KeyStrategy = KeyStrategy::Owner;
    const CREATED_AT: Option<&'static str> = Some("createdAt");
    type Create = UserResourceAttributes;

    fn owner_of(create: &UserResourceAttributes) -> &str {
        &create.user_id
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Crop profile: one per farm, stored under the farm's id.

use crate::db::{collections, KeyStrategy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CropAttributes {
    pub farm_id: String,
    pub current_crop: Option<String>,
    pub season: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub crop_rotation_history: Vec<String>,
    /// Yield per season or year label
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub yield_history: HashMap<String, f64>,
    pub seed_source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct CropProfile {
    /// Same as `farm_id`
    pub id: String,
    #[serde(flatten)]
    pub attributes: CropAttributes,
    /// Restamped on every replace
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CropUpdate {
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_crop: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub season: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_rotation_history: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_history: Option<HashMap<String, f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub seed_source: Option<Option<String>>,
}

impl Record for CropProfile {
    const COLLECTION: &'static str = collections::CROPS;
    const NAME: &'static str = "Crop profile";
    type Patch = CropUpdate;
}

impl OwnedRecord for CropProfile {
    const OWNER_FIELD: &'static str = "farmId";
    const KEY: KeyStrategy = KeyStrategy::Owner;
    const CREATED_AT: Option<&'static str> = Some("createdAt");
    type Create = CropAttributes;

    fn owner_of(create: &CropAttributes) -> &str {
        &create.farm_id
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Soil test results, many per farm.

use crate::db::{collections, KeyStrategy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub const LAST_TESTED_FIELD: &str = "lastTestedAt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SoilProfileAttributes {
    pub farm_id: String,
    #[serde(rename = "soilPH")]
    pub soil_ph: Option<f64>,
    pub nitrogen: Option<f64>,
    pub phosphorus: Option<f64>,
    pub potassium: Option<f64>,
    pub organic_carbon: Option<f64>,
    /// Micronutrient name to measured value
    pub micronutrients: Option<HashMap<String, f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct SoilProfile {
    pub id: String,
    #[serde(flatten)]
    pub attributes: SoilProfileAttributes,
    /// Stamped on create and on every update
    pub last_tested_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SoilProfileUpdate {
    #[serde(
        rename = "soilPH",
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_ph: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub nitrogen: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub phosphorus: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub potassium: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub organic_carbon: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub micronutrients: Option<Option<HashMap<String, f64>>>,
}

impl Record for SoilProfile {
    const COLLECTION: &'static str = collections::SOIL_PROFILES;
    const NAME: &'static str = "Soil profile";
    const TOUCHED_AT: Option<&'static str> = Some(LAST_TESTED_FIELD);
    type Patch = SoilProfileUpdate;
}

impl OwnedRecord for SoilProfile {
    const OWNER_FIELD: &'static str = "farmId";
    const KEY: KeyStrategy = KeyStrategy::Generated;
    const CREATED_AT: Option<&'static str> = Some(LAST_TESTED_FIELD);
    type Create = SoilProfileAttributes;

    fn owner_of(create: &SoilProfileAttributes) -> &str {
        &create.farm_id
    }
}

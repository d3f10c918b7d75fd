// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Farm model: location, land attributes and scores.

use crate::db::{collections, KeyStrategy, OwnedRecord, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub const LAST_UPDATED_FIELD: &str = "lastUpdated";

fn default_land_status() -> Option<String> {
    Some("Owned".to_string())
}

fn default_score() -> Option<f64> {
    Some(0.0)
}

/// Farm attributes as supplied on create and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct FarmAttributes {
    /// Owning user
    pub user_id: String,
    pub village: Option<String>,
    pub taluka: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
    #[serde(default = "default_land_status")]
    pub land_status: Option<String>,
    pub total_farm_area: Option<f64>,
    pub soil_type: Option<String>,
    pub water_source: Option<String>,
    pub irrigation_method: Option<String>,
    pub climate_notes: Option<String>,
    #[serde(default = "default_score")]
    pub yield_score: Option<f64>,
    #[serde(default = "default_score")]
    pub soil_score: Option<f64>,
    #[serde(default = "default_score")]
    pub storage_score: Option<f64>,
    #[serde(default = "default_score")]
    pub sustainability_score: Option<f64>,
    #[serde(default = "default_score")]
    pub quality_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    pub id: String,
    #[serde(flatten)]
    pub attributes: FarmAttributes,
    /// Stamped on create and on every update
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FarmUpdate {
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub village: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub taluka: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub district: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub state: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub pin_code: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub land_status: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_farm_area: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_type: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_source: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub irrigation_method: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub climate_notes: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub yield_score: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub soil_score: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_score: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub sustainability_score: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "super::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub quality_score: Option<Option<f64>>,
}

impl Record for Farm {
    const COLLECTION: &'static str = collections::FARMS;
    const NAME: &'static str = "Farm";
    const TOUCHED_AT: Option<&'static str> = Some(LAST_UPDATED_FIELD);
    type Patch = FarmUpdate;
}

impl OwnedRecord for Farm {
    const OWNER_FIELD: &'static str = "userId";
    const KEY: KeyStrategy = KeyStrategy::Generated;
    const CREATED_AT: Option<&'static str> = Some(LAST_UPDATED_FIELD);
    type Create = FarmAttributes;

    fn owner_of(create: &FarmAttributes) -> &str {
        &create.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_applied_on_create() {
        let attrs: FarmAttributes = serde_json::from_value(json!({ "userId": "u1" })).unwrap();
        assert_eq!(attrs.land_status.as_deref(), Some("Owned"));
        assert_eq!(attrs.yield_score, Some(0.0));
        assert_eq!(attrs.quality_score, Some(0.0));
        assert_eq!(attrs.village, None);
    }

    #[test]
    fn test_update_keeps_explicit_null() {
        let update: FarmUpdate =
            serde_json::from_value(json!({ "village": null, "soilScore": 4.5 })).unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "village": null, "soilScore": 4.5 })
        );
    }
}

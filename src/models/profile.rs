// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregated "deep" profile returned by `/api/users/{id}/profile/deep`.

use super::{
    ActivityLog, Alert, ChatMessage, CropProfile, FarmChallengeProfile, FarmResourceProfile, Farm,
    FinanceRecord, SoilProfile, User,
};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One farm with everything hanging off it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FarmBundle {
    #[serde(flatten)]
    pub farm: Farm,
    pub crop_profile: Option<CropProfile>,
    pub resource_profile: Option<FarmResourceProfile>,
    pub challenge_profile: Option<FarmChallengeProfile>,
    pub soil_profiles: Vec<SoilProfile>,
    pub activity_logs: Vec<ActivityLog>,
    pub chat_history: Vec<ChatMessage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FullProfile {
    pub profile: User,
    pub finance_records: Vec<FinanceRecord>,
    pub alerts: Vec<Alert>,
    /// Same order as the farm listing for the user
    pub farms: Vec<FarmBundle>,
}

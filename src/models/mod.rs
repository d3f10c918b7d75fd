// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.
//!
//! Each stored entity has an `*Attributes` struct (the create body, also the
//! stored field set), a response struct adding `id` and server-stamped
//! timestamps, and an `*Update` struct for partial updates.
//!
//! Update structs distinguish "not sent" from "sent as null": nullable
//! fields are `Option<Option<T>>`, skipped when `None`. Required fields and
//! collections are `Option<T>`, where `null` counts as not sent.

pub mod alert;
pub mod challenge;
pub mod chat;
pub mod crop;
pub mod farm;
pub mod finance;
pub mod log;
pub mod profile;
pub mod resource;
pub mod soil;
pub mod speech;
pub mod user;

pub use alert::{Alert, AlertAttributes, AlertUpdate};
pub use challenge::{
    ChallengeFields, ChallengeUpdate, FarmChallengeAttributes, FarmChallengeProfile,
    UserChallengeAttributes, UserChallengeProfile,
};
pub use chat::{ChatAttributes, ChatMessage, ChatUpdate};
pub use crop::{CropAttributes, CropProfile, CropUpdate};
pub use farm::{Farm, FarmAttributes, FarmUpdate};
pub use finance::{FinanceAttributes, FinanceRecord, FinanceUpdate};
pub use log::{ActivityLog, LogAttributes, LogUpdate};
pub use profile::{FarmBundle, FullProfile};
pub use resource::{
    FarmResourceAttributes, FarmResourceProfile, ResourceFields, ResourceUpdate,
    UserResourceAttributes, UserResourceProfile,
};
pub use soil::{SoilProfile, SoilProfileAttributes, SoilProfileUpdate};
pub use speech::{Language, SynthesizeRequest};
pub use user::{LoginRequest, RegisterRequest, User, UserProfileFields, UserUpdate};

use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be absent, `null`, or a value.
///
/// Use with `#[serde(default)]` so an absent field stays `None` while an
/// explicit `null` becomes `Some(None)`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize `null` as the type's default (empty list or map).
pub(crate) fn null_as_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

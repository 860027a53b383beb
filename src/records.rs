use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::biometrics::ActivityLevel;

time::serde::format_description!(
    log_timestamp,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// Current UTC wall-clock time at whole-second precision, matching what the
/// logs can hold.
pub fn now_timestamp() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    let now = now.replace_nanosecond(0).unwrap_or(now);
    PrimitiveDateTime::new(now.date(), now.time())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentRecord {
    #[serde(with = "log_timestamp")]
    pub timestamp: PrimitiveDateTime,
    pub consent_given: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(with = "log_timestamp")]
    pub timestamp: PrimitiveDateTime,
    pub sex: String,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
    pub allergies: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealsPlannedRecord {
    #[serde(with = "log_timestamp")]
    pub timestamp: PrimitiveDateTime,
    pub meals_planned: u32,
}

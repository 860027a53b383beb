use std::{collections::BTreeMap, fmt};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Nutrient name to amount for one day, in the order upstream listed them.
pub type NutrientSummary = IndexMap<String, f64>;

/// Upstream keys days in lowercase; everything we hand out is capitalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all(serialize = "PascalCase", deserialize = "lowercase"))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealEntry {
    pub day: Weekday,
    pub title: String,
    pub prep_minutes: u32,
    pub servings: u32,
    pub source_url: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyPlan {
    pub meals: Vec<MealEntry>,
    pub nutrients: BTreeMap<Weekday, NutrientSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub target_calories: f64,
    pub diet: String,
    /// Forwarded as typed by the user, not split into a list.
    pub exclude: String,
}

/// Why a plan did not arrive. `status` is absent when no response came back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDiagnostic {
    pub status: Option<u16>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Delivered(WeeklyPlan),
    Rejected(PlanDiagnostic),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanQuery<'a> {
    pub api_key: &'a str,
    pub time_frame: &'a str,
    pub target_calories: f64,
    pub diet: &'a str,
    pub exclude: &'a str,
}

// --- upstream wire format ---

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WeekEnvelope {
    Wrapped { week: BTreeMap<Weekday, UpstreamDay> },
    Bare(BTreeMap<Weekday, UpstreamDay>),
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamDay {
    #[serde(default)]
    pub nutrients: NutrientSummary,
    #[serde(default)]
    pub meals: Vec<UpstreamMeal>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpstreamMeal {
    pub title: String,
    pub ready_in_minutes: u32,
    pub servings: u32,
    pub source_url: String,
    #[serde(default)]
    pub image: String,
}

impl From<WeekEnvelope> for WeeklyPlan {
    fn from(envelope: WeekEnvelope) -> Self {
        let week = match envelope {
            WeekEnvelope::Wrapped { week } => week,
            WeekEnvelope::Bare(week) => week,
        };
        let mut plan = WeeklyPlan::default();
        for (day, details) in week {
            plan.nutrients.insert(day, details.nutrients);
            plan.meals.extend(details.meals.into_iter().map(|m| MealEntry {
                day,
                title: m.title,
                prep_minutes: m.ready_in_minutes,
                servings: m.servings,
                source_url: m.source_url,
                image: m.image,
            }));
        }
        plan
    }
}

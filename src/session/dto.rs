use serde::{Deserialize, Serialize};

use super::state::NO_ALLERGIES;
use crate::planner::{PlanDiagnostic, Weekday};

#[derive(Debug, Clone, Deserialize)]
pub struct ConsentForm {
    pub granted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileForm {
    pub sex: String,
    pub age: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: String,
    #[serde(default = "default_allergies")]
    pub allergies: String,
}

fn default_allergies() -> String {
    NO_ALLERGIES.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSubmission {
    pub calorie_target: f64,
    pub meals_received: usize,
    /// Present when the plan service gave nothing back.
    pub plan_diagnostic: Option<PlanDiagnostic>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealView {
    pub title: String,
    pub image_url: String,
    pub prep_minutes: u32,
    pub servings: u32,
    pub source_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientLine {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPlanView {
    pub day: Weekday,
    pub meals: Vec<MealView>,
    pub nutrients: Vec<NutrientLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    pub days: Vec<DayPlanView>,
    pub meals_planned: u32,
}

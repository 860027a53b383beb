use std::collections::BTreeMap;

use serde::Serialize;

use crate::biometrics::ActivityLevel;
use crate::planner::{MealEntry, NutrientSummary, WeeklyPlan, Weekday};

/// Last stage the session reached. Recorded for reporting only, nothing
/// checks that stages happen in order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Fresh,
    ConsentGiven,
    ProfileSubmitted,
    PlanGenerated,
    PlanAcknowledged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub sex: String,
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity_level: ActivityLevel,
}

/// Everything one user's session holds in memory. Dropped with the session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub stage: Stage,
    pub profile: Option<Profile>,
    pub calorie_target: f64,
    pub allergies: String,
    pub meals: Vec<MealEntry>,
    pub nutrients: BTreeMap<Weekday, NutrientSummary>,
    /// Meals counted by the most recent plan view.
    pub meals_planned_count: u32,
}

pub const NO_ALLERGIES: &str = "None";

impl Default for SessionState {
    fn default() -> Self {
        Self {
            stage: Stage::Fresh,
            profile: None,
            calorie_target: 0.0,
            allergies: NO_ALLERGIES.to_string(),
            meals: Vec::new(),
            nutrients: BTreeMap::new(),
            meals_planned_count: 0,
        }
    }
}

impl SessionState {
    pub fn clear_plan(&mut self) {
        self.meals.clear();
        self.nutrients.clear();
    }

    /// Replaces the held plan wholesale.
    pub fn apply_plan(&mut self, plan: WeeklyPlan) {
        self.meals = plan.meals;
        self.nutrients = plan.nutrients;
    }
}

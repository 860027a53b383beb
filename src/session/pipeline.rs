use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::dto::{
    DayPlanView, MealView, NutrientLine, PlanView, ProfileForm, ProfileSubmission,
};
use super::state::{Profile, SessionState, Stage};
use crate::biometrics::{daily_calorie_target, ActivityLevel, Sex};
use crate::errors::AppError;
use crate::planner::{MealPlanner, PlanOutcome, PlanRequest, Weekday};
use crate::records::{now_timestamp, ConsentRecord, MealsPlannedRecord, ProfileRecord};
use crate::storage::{CsvStore, RecordLog};

const MAX_AGE: i64 = 100;
const MAX_WEIGHT_KG: f64 = 600.0;
const MAX_HEIGHT_CM: f64 = 600.0;

/// Intake, calorie target, plan retrieval, and history writes. Holds no
/// per-user data itself; every call works on the session it is handed.
#[derive(Clone)]
pub struct Pipeline {
    store: Arc<CsvStore>,
    planner: Arc<dyn MealPlanner>,
    diet: String,
    image_base_url: String,
}

impl Pipeline {
    pub fn new(
        store: Arc<CsvStore>,
        planner: Arc<dyn MealPlanner>,
        diet: impl Into<String>,
        image_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            planner,
            diet: diet.into(),
            image_base_url: image_base_url.into(),
        }
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    #[instrument(skip(self, session))]
    pub fn submit_consent(
        &self,
        session: &mut SessionState,
        granted: bool,
    ) -> Result<ConsentRecord, AppError> {
        if !granted {
            warn!("consent not granted");
            return Err(AppError::Validation(
                "You must agree to the consent terms before proceeding.".into(),
            ));
        }
        let record = ConsentRecord {
            timestamp: now_timestamp(),
            consent_given: true,
        };
        self.store.append(RecordLog::Consent, &record)?;
        session.stage = Stage::ConsentGiven;
        info!("consent recorded");
        Ok(record)
    }

    #[instrument(skip(self, session, form), fields(activity_level = %form.activity_level))]
    pub async fn submit_profile(
        &self,
        session: &mut SessionState,
        form: ProfileForm,
    ) -> Result<ProfileSubmission, AppError> {
        validate_ranges(&form)?;
        let activity_level: ActivityLevel = form.activity_level.parse()?;
        let age = form.age as u32;

        let sex = form.sex.trim().to_string();
        let allergies = form.allergies.trim().to_string();

        let calorie_target = daily_calorie_target(
            form.weight_kg,
            form.height_cm,
            age,
            Sex::from_input(&sex),
            activity_level,
        );

        session.profile = Some(Profile {
            sex: sex.clone(),
            age,
            weight_kg: form.weight_kg,
            height_cm: form.height_cm,
            activity_level,
        });
        session.allergies = allergies.clone();
        session.calorie_target = calorie_target;
        session.stage = Stage::ProfileSubmitted;
        session.clear_plan();

        let request = PlanRequest {
            target_calories: calorie_target,
            diet: self.diet.clone(),
            exclude: allergies.clone(),
        };
        let plan_diagnostic = match self.planner.fetch_weekly_plan(&request).await {
            PlanOutcome::Delivered(plan) => {
                session.apply_plan(plan);
                session.stage = Stage::PlanGenerated;
                None
            }
            PlanOutcome::Rejected(diagnostic) => {
                warn!(status = ?diagnostic.status, "no meal plan for this submission");
                Some(diagnostic)
            }
        };

        let record = ProfileRecord {
            timestamp: now_timestamp(),
            sex,
            age,
            weight_kg: form.weight_kg,
            height_cm: form.height_cm,
            activity_level,
            allergies,
        };
        self.store.append(RecordLog::Profile, &record)?;

        info!(
            calorie_target,
            meals = session.meals.len(),
            "profile submitted"
        );
        Ok(ProfileSubmission {
            calorie_target,
            meals_received: session.meals.len(),
            plan_diagnostic,
        })
    }

    /// Groups the held meals by day in first-seen order and recounts them.
    pub fn view_plan(&self, session: &mut SessionState) -> PlanView {
        session.meals_planned_count = 0;

        let mut days: Vec<Weekday> = Vec::new();
        for meal in &session.meals {
            if !days.contains(&meal.day) {
                days.push(meal.day);
            }
        }

        let mut out = Vec::with_capacity(days.len());
        for day in days {
            let mut meals = Vec::new();
            for meal in session.meals.iter().filter(|m| m.day == day) {
                meals.push(MealView {
                    title: meal.title.clone(),
                    image_url: self.image_url(&meal.image),
                    prep_minutes: meal.prep_minutes,
                    servings: meal.servings,
                    source_url: meal.source_url.clone(),
                });
                session.meals_planned_count += 1;
            }
            let nutrients = session
                .nutrients
                .get(&day)
                .map(|summary| {
                    summary
                        .iter()
                        .map(|(name, amount)| NutrientLine {
                            name: nutrient_display_name(name),
                            amount: *amount,
                        })
                        .collect()
                })
                .unwrap_or_default();
            out.push(DayPlanView { day, meals, nutrients });
        }

        PlanView {
            days: out,
            meals_planned: session.meals_planned_count,
        }
    }

    #[instrument(skip(self, session))]
    pub fn acknowledge_plan(
        &self,
        session: &mut SessionState,
    ) -> Result<MealsPlannedRecord, AppError> {
        let record = MealsPlannedRecord {
            timestamp: now_timestamp(),
            meals_planned: session.meals_planned_count,
        };
        self.store.append(RecordLog::MealsPlanned, &record)?;
        session.stage = Stage::PlanAcknowledged;
        info!(meals_planned = record.meals_planned, "plan acknowledged");
        Ok(record)
    }

    fn image_url(&self, image: &str) -> String {
        format!("{}/{}", self.image_base_url.trim_end_matches('/'), image)
    }
}

fn validate_ranges(form: &ProfileForm) -> Result<(), AppError> {
    if !(0..=MAX_AGE).contains(&form.age) {
        return Err(AppError::Validation(format!(
            "Age must be between 0 and {MAX_AGE}."
        )));
    }
    if !(0.0..=MAX_WEIGHT_KG).contains(&form.weight_kg) {
        return Err(AppError::Validation(format!(
            "Weight must be between 0 and {MAX_WEIGHT_KG} kg."
        )));
    }
    if !(0.0..=MAX_HEIGHT_CM).contains(&form.height_cm) {
        return Err(AppError::Validation(format!(
            "Height must be between 0 and {MAX_HEIGHT_CM} cm."
        )));
    }
    Ok(())
}

/// `saturated_fat` -> `Saturated fat`
pub fn nutrient_display_name(raw: &str) -> String {
    let spaced = raw.replace('_', " ");
    let mut chars = spaced.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out: String = first.to_uppercase().collect();
    out.push_str(&chars.as_str().to_lowercase());
    out
}

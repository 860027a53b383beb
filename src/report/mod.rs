use serde::Serialize;

use crate::biometrics::{centimeters_to_feet_inches, kilograms_to_pounds, ActivityLevel};
use crate::errors::AppError;
use crate::records::MealsPlannedRecord;
use crate::session::SessionState;
use crate::storage::{CsvStore, RecordLog};

/// Read-only copy of the current session's profile. Never taken from the
/// profile log, so it only reflects the latest submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileSnapshot {
    pub age: Option<u32>,
    pub sex: Option<String>,
    pub calorie_target: i64,
    pub allergies: String,
    pub weight_lbs: f64,
    pub height_feet_inches: String,
    pub activity_level: Option<ActivityLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Oldest first.
    pub time_series: Vec<MealsPlannedRecord>,
    pub total_meals_planned: u64,
    pub profile: ProfileSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_meals_planned: u64,
    pub average_prep_minutes: Option<f64>,
    pub calorie_target: i64,
}

pub fn build_report(store: &CsvStore, session: &SessionState) -> Result<Report, AppError> {
    let mut time_series: Vec<MealsPlannedRecord> = store.load_all(RecordLog::MealsPlanned)?;
    time_series.sort_by_key(|r| r.timestamp);
    let total_meals_planned = total(&time_series);

    Ok(Report {
        time_series,
        total_meals_planned,
        profile: snapshot(session),
    })
}

pub fn build_overview(store: &CsvStore, session: &SessionState) -> Result<Overview, AppError> {
    let history: Vec<MealsPlannedRecord> = store.load_all(RecordLog::MealsPlanned)?;
    let average_prep_minutes = if session.meals.is_empty() {
        None
    } else {
        let sum: u64 = session.meals.iter().map(|m| u64::from(m.prep_minutes)).sum();
        Some(sum as f64 / session.meals.len() as f64)
    };
    Ok(Overview {
        total_meals_planned: total(&history),
        average_prep_minutes,
        calorie_target: session.calorie_target.ceil() as i64,
    })
}

fn total(records: &[MealsPlannedRecord]) -> u64 {
    records.iter().map(|r| u64::from(r.meals_planned)).sum()
}

fn snapshot(session: &SessionState) -> ProfileSnapshot {
    let profile = session.profile.as_ref();
    ProfileSnapshot {
        age: profile.map(|p| p.age),
        sex: profile.map(|p| p.sex.clone()),
        calorie_target: session.calorie_target.ceil() as i64,
        allergies: session.allergies.clone(),
        weight_lbs: kilograms_to_pounds(profile.map_or(0.0, |p| p.weight_kg)),
        height_feet_inches: centimeters_to_feet_inches(profile.map_or(0.0, |p| p.height_cm)),
        activity_level: profile.map(|p| p.activity_level),
    }
}

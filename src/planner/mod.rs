pub mod client;
pub mod dto;

use async_trait::async_trait;

pub use client::SpoonacularPlanner;
pub use dto::{
    MealEntry, NutrientSummary, PlanDiagnostic, PlanOutcome, PlanRequest, WeeklyPlan, Weekday,
};

/// Upstream weekly meal plan source. Failures come back as
/// [`PlanOutcome::Rejected`], never as a panic or an error.
#[async_trait]
pub trait MealPlanner: Send + Sync {
    async fn fetch_weekly_plan(&self, req: &PlanRequest) -> PlanOutcome;
}

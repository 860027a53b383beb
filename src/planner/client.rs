use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, warn};

use super::dto::{PlanDiagnostic, PlanOutcome, PlanQuery, PlanRequest, WeekEnvelope, WeeklyPlan};
use super::MealPlanner;
use crate::config::PlannerConfig;

/// Spoonacular `mealplanner/generate` client. One request per call, default
/// client timeouts, no retries.
#[derive(Clone)]
pub struct SpoonacularPlanner {
    http: Client,
    url: String,
    api_key: String,
}

impl SpoonacularPlanner {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            http: Client::new(),
            url: config.url.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl MealPlanner for SpoonacularPlanner {
    #[instrument(skip(self), fields(target_calories = req.target_calories))]
    async fn fetch_weekly_plan(&self, req: &PlanRequest) -> PlanOutcome {
        let query = PlanQuery {
            api_key: &self.api_key,
            time_frame: "week",
            target_calories: req.target_calories,
            diet: &req.diet,
            exclude: &req.exclude,
        };

        let response = match self.http.get(&self.url).query(&query).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "meal plan request failed");
                return PlanOutcome::Rejected(PlanDiagnostic {
                    status: None,
                    body: e.to_string(),
                });
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            warn!(status = status.as_u16(), %body, "meal plan request rejected");
            return PlanOutcome::Rejected(PlanDiagnostic {
                status: Some(status.as_u16()),
                body,
            });
        }

        match serde_json::from_str::<WeekEnvelope>(&body) {
            Ok(envelope) => {
                let plan = WeeklyPlan::from(envelope);
                info!(meals = plan.meals.len(), days = plan.nutrients.len(), "meal plan received");
                PlanOutcome::Delivered(plan)
            }
            Err(e) => {
                warn!(error = %e, %body, "meal plan body not understood");
                PlanOutcome::Rejected(PlanDiagnostic {
                    status: Some(status.as_u16()),
                    body,
                })
            }
        }
    }
}

use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use serde::Deserialize;

use crate::locator::BoundingBox;

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    pub url: String,
    pub api_key: String,
    pub diet: String,
    pub image_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocatorConfig {
    pub url: String,
    pub bbox: BoundingBox,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub planner: PlannerConfig,
    pub locator: LocatorConfig,
    /// Sessions untouched for this long are dropped.
    pub session_idle: Duration,
}

const DEFAULT_SESSION_IDLE_MINUTES: u64 = 30;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let or = |key: &str, fallback: &str| var(key).unwrap_or_else(|| fallback.to_string());

        let planner = PlannerConfig {
            url: or("SPOONACULAR_URL", "https://api.spoonacular.com/mealplanner/generate"),
            api_key: var("SPOONACULAR_API_KEY").context("SPOONACULAR_API_KEY must be set")?,
            diet: or("MEAL_PLAN_DIET", "none"),
            image_base_url: or("SPOONACULAR_IMAGE_BASE", "https://spoonacular.com/recipeImages"),
        };

        let bbox = match var("STORE_BBOX") {
            Some(raw) => raw
                .parse::<BoundingBox>()
                .with_context(|| format!("STORE_BBOX is not a bounding box: {raw}"))?,
            None => BoundingBox::default(),
        };
        let locator = LocatorConfig {
            url: or("OVERPASS_URL", "http://overpass-api.de/api/interpreter"),
            bbox,
        };

        let idle_minutes = match var("SESSION_IDLE_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("SESSION_IDLE_MINUTES is not a whole number: {raw}"))?,
            None => DEFAULT_SESSION_IDLE_MINUTES,
        };

        Ok(Self {
            data_dir: PathBuf::from(or("DATA_DIR", "data")),
            planner,
            locator,
            session_idle: Duration::from_secs(idle_minutes * 60),
        })
    }
}

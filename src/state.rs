use crate::config::AppConfig;
use crate::locator::{OverpassLocator, StoreLocator};
use crate::planner::{MealPlanner, SpoonacularPlanner};
use crate::session::{Pipeline, SessionRegistry};
use crate::storage::CsvStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Pipeline,
    pub locator: Arc<dyn StoreLocator>,
    pub sessions: SessionRegistry,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let planner = Arc::new(SpoonacularPlanner::new(&config.planner)) as Arc<dyn MealPlanner>;
        let locator = Arc::new(OverpassLocator::new(config.locator.url.clone())) as Arc<dyn StoreLocator>;

        Ok(Self::from_parts(config, planner, locator))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        planner: Arc<dyn MealPlanner>,
        locator: Arc<dyn StoreLocator>,
    ) -> Self {
        let store = Arc::new(CsvStore::new(config.data_dir.clone()));
        let pipeline = Pipeline::new(
            store,
            planner,
            config.planner.diet.clone(),
            config.planner.image_base_url.clone(),
        );
        let sessions = SessionRegistry::new(config.session_idle);
        Self {
            config,
            pipeline,
            locator,
            sessions,
        }
    }

    /// Offline state for tests: canned two-day plan, two stores, logs under `data_dir`.
    #[cfg(test)]
    pub fn fake(data_dir: &std::path::Path) -> Self {
        use crate::errors::AppError;
        use crate::locator::{BoundingBox, GroceryStore};
        use crate::planner::{MealEntry, PlanOutcome, PlanRequest, WeeklyPlan, Weekday};
        use async_trait::async_trait;
        use indexmap::IndexMap;
        use std::collections::BTreeMap;

        struct FakePlanner;
        #[async_trait]
        impl MealPlanner for FakePlanner {
            async fn fetch_weekly_plan(&self, _req: &PlanRequest) -> PlanOutcome {
                let meal = |day, title: &str, minutes| MealEntry {
                    day,
                    title: title.to_string(),
                    prep_minutes: minutes,
                    servings: 2,
                    source_url: format!("https://fake.local/{title}"),
                    image: format!("{title}.jpg"),
                };
                PlanOutcome::Delivered(WeeklyPlan {
                    meals: vec![
                        meal(Weekday::Monday, "porridge", 10),
                        meal(Weekday::Monday, "stew", 50),
                        meal(Weekday::Tuesday, "salad", 15),
                    ],
                    nutrients: BTreeMap::from([
                        (Weekday::Monday, IndexMap::from([("calories".to_string(), 2100.0)])),
                        (Weekday::Tuesday, IndexMap::from([("calories".to_string(), 1950.0)])),
                    ]),
                })
            }
        }

        struct FakeLocator;
        #[async_trait]
        impl StoreLocator for FakeLocator {
            async fn nearby_grocery_stores(
                &self,
                _bbox: &BoundingBox,
            ) -> Result<Vec<GroceryStore>, AppError> {
                Ok(vec![
                    GroceryStore { name: "Publix".into(), lat: Some(25.77), lon: Some(-80.19) },
                    GroceryStore { name: "Unnamed Store".into(), lat: Some(27.9), lon: Some(-82.4) },
                ])
            }
        }

        let config = Arc::new(AppConfig {
            data_dir: data_dir.to_path_buf(),
            planner: crate::config::PlannerConfig {
                url: "fake".into(),
                api_key: "fake".into(),
                diet: "none".into(),
                image_base_url: "https://fake.local/img".into(),
            },
            locator: crate::config::LocatorConfig {
                url: "fake".into(),
                bbox: BoundingBox::default(),
            },
            session_idle: std::time::Duration::from_secs(3600),
        });

        Self::from_parts(config, Arc::new(FakePlanner), Arc::new(FakeLocator))
    }
}

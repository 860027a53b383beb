use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, warn};

use super::dto::{BoundingBox, GroceryStore, OverpassResponse};
use super::StoreLocator;
use crate::errors::AppError;

/// Overpass QL for supermarket and grocery nodes inside `bbox`.
pub fn grocery_query(bbox: &BoundingBox) -> String {
    let area = format!("{},{},{},{}", bbox.south, bbox.west, bbox.north, bbox.east);
    format!(
        "[out:json][timeout:25];\n(\n  node[\"shop\"=\"supermarket\"]({area});\n  node[\"shop\"=\"grocery\"]({area});\n);\nout body;\n"
    )
}

#[derive(Clone)]
pub struct OverpassLocator {
    http: Client,
    url: String,
}

impl OverpassLocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl StoreLocator for OverpassLocator {
    #[instrument(skip(self))]
    async fn nearby_grocery_stores(&self, bbox: &BoundingBox) -> Result<Vec<GroceryStore>, AppError> {
        let query = grocery_query(bbox);
        let response = self
            .http
            .get(&self.url)
            .query(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("store locator: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "store locator rejected query");
            return Err(AppError::Upstream(format!("store locator returned {status}")));
        }

        let parsed: OverpassResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("store locator body: {e}")))?;
        let stores: Vec<GroceryStore> = parsed.elements.into_iter().map(GroceryStore::from).collect();
        info!(stores = stores.len(), "grocery stores found");
        Ok(stores)
    }
}

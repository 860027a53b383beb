pub mod client;
pub mod dto;

use async_trait::async_trait;

pub use client::OverpassLocator;
pub use dto::{BoundingBox, GroceryStore};

use crate::errors::AppError;

#[async_trait]
pub trait StoreLocator: Send + Sync {
    async fn nearby_grocery_stores(&self, bbox: &BoundingBox) -> Result<Vec<GroceryStore>, AppError>;
}

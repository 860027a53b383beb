use axum::{extract::State, Json};
use serde::Serialize;
use tracing::instrument;

use super::session::SessionId;
use crate::{
    errors::AppError,
    locator::GroceryStore,
    report::{build_overview, build_report, Overview, Report},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct StoresResponse {
    pub count: usize,
    pub stores: Vec<GroceryStore>,
}

#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<Report>, AppError> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    Ok(Json(build_report(state.pipeline.store(), &session)?))
}

#[instrument(skip(state))]
pub async fn get_overview(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<Overview>, AppError> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    Ok(Json(build_overview(state.pipeline.store(), &session)?))
}

#[instrument(skip(state))]
pub async fn list_stores(State(state): State<AppState>) -> Result<Json<StoresResponse>, AppError> {
    let stores = state
        .locator
        .nearby_grocery_stores(&state.config.locator.bbox)
        .await?;
    Ok(Json(StoresResponse {
        count: stores.len(),
        stores,
    }))
}

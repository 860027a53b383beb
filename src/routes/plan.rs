use axum::{extract::State, Json};
use tracing::instrument;

use super::session::SessionId;
use crate::{
    errors::AppError,
    records::MealsPlannedRecord,
    session::dto::PlanView,
    state::AppState,
};

#[instrument(skip(state))]
pub async fn view_plan(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<PlanView>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    Ok(Json(state.pipeline.view_plan(&mut session)))
}

#[instrument(skip(state))]
pub async fn acknowledge_plan(
    State(state): State<AppState>,
    SessionId(id): SessionId,
) -> Result<Json<MealsPlannedRecord>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    let record = state.pipeline.acknowledge_plan(&mut session)?;
    Ok(Json(record))
}

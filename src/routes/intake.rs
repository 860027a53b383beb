use axum::{extract::State, Json};
use tracing::instrument;

use super::session::SessionId;
use crate::{
    errors::AppError,
    records::ConsentRecord,
    session::dto::{ConsentForm, ProfileForm, ProfileSubmission},
    state::AppState,
};

#[instrument(skip(state))]
pub async fn submit_consent(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    Json(form): Json<ConsentForm>,
) -> Result<Json<ConsentRecord>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    let record = state.pipeline.submit_consent(&mut session, form.granted)?;
    Ok(Json(record))
}

#[instrument(skip(state, form))]
pub async fn submit_profile(
    State(state): State<AppState>,
    SessionId(id): SessionId,
    Json(form): Json<ProfileForm>,
) -> Result<Json<ProfileSubmission>, AppError> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    let submission = state.pipeline.submit_profile(&mut session, form).await?;
    Ok(Json(submission))
}

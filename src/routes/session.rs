use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;

pub const SESSION_HEADER: &str = "x-session-id";

/// Session id taken from the `x-session-id` header.
#[derive(Debug, Clone, Copy)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or((StatusCode::BAD_REQUEST, "missing x-session-id header".into()))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| (StatusCode::BAD_REQUEST, "invalid x-session-id header".into()))?;

        Ok(SessionId(id))
    }
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[instrument(skip(state))]
pub async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionCreated>) {
    let session_id = state.sessions.create().await;
    info!(%session_id, "session started");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

#[instrument(skip(state))]
pub async fn end_session(State(state): State<AppState>, SessionId(id): SessionId) -> StatusCode {
    if state.sessions.end(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

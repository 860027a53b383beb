use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// User-facing warning; the submission changed nothing.
    #[error("{0}")]
    Validation(String),

    #[error("unknown activity level: {0}")]
    UnknownActivityLevel(String),

    #[error("session not found")]
    SessionNotFound,

    #[error("record log io: {0}")]
    Io(#[from] std::io::Error),

    #[error("record log format: {0}")]
    Csv(#[from] csv::Error),

    #[error("upstream service: {0}")]
    Upstream(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::UnknownActivityLevel(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::SessionNotFound => StatusCode::NOT_FOUND,
            AppError::Io(_) | AppError::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

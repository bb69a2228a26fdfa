use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use lotto_ensemble::EnsembleError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Ensemble(#[from] EnsembleError),

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ensemble(EnsembleError::InvalidCandidate(_))
            | Self::Ensemble(EnsembleError::InvalidBias(_))
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Ensemble(EnsembleError::InvalidWeightState(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::Ensemble(EnsembleError::Configuration(_))
            | Self::Config(_)
            | Self::Io(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        let body = json!({
            "status": "error",
            "message": self.to_string(),
            "timestamp": chrono::Local::now().to_rfc3339(),
        });
        (status, Json(body)).into_response()
    }
}

use http::StatusCode;
use thiserror::Error;

use crate::models::launch_models::ValidationErrors;

/// Failures surfaced by the two container endpoints. None are retried.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    #[error("failed to inspect container {id}: {message}")]
    InspectFailed { id: String, message: String },

    #[error("invalid launch request: {0}")]
    ValidationFailed(ValidationErrors),

    ///underlying create/start message, passed through unchanged
    #[error("{0}")]
    LaunchFailed(String),

    #[error("malformed request: {0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RuntimeUnavailable(_) | Self::InspectFailed { .. } | Self::LaunchFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

use crate::models::ErrorResponse;
use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Request-level failures of the assistant endpoints.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The client left out a required input.
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),

    /// The body or query string could not be decoded into the expected shape.
    #[error("{0}")]
    InvalidRequest(String),

    /// The generation capability failed; carries the upstream message.
    #[error("{0}")]
    GenerationFailure(#[from] ProviderError),
}

impl AssistantError {
    pub fn status(&self) -> StatusCode {
        match self {
            AssistantError::MissingField(_) | AssistantError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AssistantError::GenerationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        (
            self.status(),
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

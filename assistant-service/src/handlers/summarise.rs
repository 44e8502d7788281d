use crate::error::AssistantError;
use crate::models::{SummariseRequest, SummariseResponse};
use crate::startup::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};

/// `POST /summarise`: summarise a list of paper titles.
pub async fn summarise(
    State(state): State<AppState>,
    payload: Result<Json<SummariseRequest>, JsonRejection>,
) -> Result<Json<SummariseResponse>, AssistantError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected summarise request body");
        AssistantError::InvalidRequest(rejection.body_text())
    })?;

    let summary = state
        .assistant
        .summarize(request.summaries.as_deref())
        .await?;

    Ok(Json(SummariseResponse { summary }))
}

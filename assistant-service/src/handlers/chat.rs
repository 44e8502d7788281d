use crate::error::AssistantError;
use crate::models::chat::NO_MESSAGE_REPLY;
use crate::models::{ChatParams, ChatResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// `GET /chat?message=...`: formal reply to a single message.
///
/// A missing message is answered in the reply envelope rather than the
/// error envelope, so chat clients can render it directly.
pub async fn chat(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
    params: Result<Query<ChatParams>, QueryRejection>,
) -> Response {
    let params = match decode_params(raw_query.as_deref(), params) {
        Ok(params) => params,
        Err(e) => return e.into_response(),
    };

    match state.assistant.chat(params.message.as_deref()).await {
        Ok(reply) => Json(ChatResponse { reply }).into_response(),
        Err(AssistantError::MissingField(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse {
                reply: NO_MESSAGE_REPLY.to_string(),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

fn decode_params(
    raw_query: Option<&str>,
    params: Result<Query<ChatParams>, QueryRejection>,
) -> Result<ChatParams, AssistantError> {
    let Query(params) = params.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected chat query string");
        AssistantError::InvalidRequest(rejection.body_text())
    })?;

    // The query extractor replaces invalid UTF-8 with U+FFFD; refuse it instead
    if let Some(raw) = raw_query {
        ensure_utf8_query(raw)?;
    }

    Ok(params)
}

/// Every percent-decoded key and value must be valid UTF-8.
fn ensure_utf8_query(raw: &str) -> Result<(), AssistantError> {
    let invalid = raw
        .split('&')
        .flat_map(|pair| pair.splitn(2, '='))
        .any(|component| urlencoding::decode(&component.replace('+', " ")).is_err());

    if invalid {
        tracing::warn!("Rejected chat query string with invalid UTF-8");
        return Err(AssistantError::InvalidRequest(
            "Query string is not valid UTF-8".to_string(),
        ));
    }

    Ok(())
}

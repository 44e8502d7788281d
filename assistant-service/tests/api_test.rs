//! Router-level tests for the assistant endpoints, backed by the stub provider.

use assistant_service::config::AssistantConfig;
use assistant_service::services::providers::mock::MockTextProvider;
use assistant_service::services::Assistant;
use assistant_service::startup::{build_router, AppState};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

fn app_with(provider: Arc<MockTextProvider>) -> Router {
    let state = AppState {
        config: Arc::new(AssistantConfig::with_api_key("test-api-key")),
        assistant: Assistant::new(provider),
    };
    build_router(state)
}

fn summarise_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/summarise")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn chat_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn summarise_returns_model_text() {
    let provider = Arc::new(MockTextProvider::replying("These papers study transformers."));
    let app = app_with(provider.clone());

    let response = app
        .oneshot(summarise_request(
            r#"{"summaries": ["Attention Is All You Need", "Vision Transformers"]}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["summary"], "These papers study transformers.");

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Attention Is All You Need Vision Transformers"));
}

#[tokio::test]
async fn summarise_with_empty_list_still_calls_model() {
    let provider = Arc::new(MockTextProvider::replying("Nothing to summarise."));
    let app = app_with(provider.clone());

    let response = app
        .oneshot(summarise_request(r#"{"summaries": []}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn summarise_without_summaries_key_is_bad_request() {
    let provider = Arc::new(MockTextProvider::echo());
    let app = app_with(provider.clone());

    let response = app
        .oneshot(summarise_request(r#"{"titles": ["x"]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Missing 'summaries' in request body");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn summarise_with_malformed_body_is_bad_request() {
    let provider = Arc::new(MockTextProvider::echo());
    let app = app_with(provider.clone());

    let response = app
        .oneshot(summarise_request(r#"{"summaries": [1, 2]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn summarise_reports_generation_failure() {
    let app = app_with(Arc::new(MockTextProvider::failing("model overloaded")));

    let response = app
        .oneshot(summarise_request(r#"{"summaries": ["A paper"]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn summarise_preserves_non_ascii_text() {
    let app = app_with(Arc::new(MockTextProvider::replying("Résumé: 深度学习 survey")));

    let response = app
        .oneshot(summarise_request(r#"{"summaries": ["Über Netze"]}"#))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["summary"], "Résumé: 深度学习 survey");
}

#[tokio::test]
async fn chat_returns_reply() {
    let provider = Arc::new(MockTextProvider::replying("Good afternoon."));
    let app = app_with(provider.clone());

    let response = app.oneshot(chat_request("/chat?message=Hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["reply"], "Good afternoon.");

    let prompts = provider.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Hello"));
}

#[tokio::test]
async fn chat_decodes_query_string() {
    let provider = Arc::new(MockTextProvider::echo());
    let app = app_with(provider.clone());

    let response = app
        .oneshot(chat_request("/chat?message=How%20are%20you%3F"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(provider.prompts()[0].ends_with("How are you?"));
}

#[tokio::test]
async fn chat_without_message_is_bad_request() {
    for uri in ["/chat", "/chat?message="] {
        let provider = Arc::new(MockTextProvider::echo());
        let app = app_with(provider.clone());

        let response = app.oneshot(chat_request(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let body = json_body(response).await;
        assert_eq!(body["reply"], "No message provided");
        assert_eq!(provider.call_count(), 0);
    }
}

#[tokio::test]
async fn chat_with_duplicated_message_is_json_bad_request() {
    let provider = Arc::new(MockTextProvider::echo());
    let app = app_with(provider.clone());

    let response = app
        .oneshot(chat_request("/chat?message=a&message=b"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("message"));
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn chat_with_invalid_utf8_message_is_rejected() {
    let provider = Arc::new(MockTextProvider::echo());
    let app = app_with(provider.clone());

    let response = app.oneshot(chat_request("/chat?message=%FF")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Query string is not valid UTF-8");
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn chat_reports_generation_failure() {
    let app = app_with(Arc::new(MockTextProvider::failing("quota exceeded")));

    let response = app.oneshot(chat_request("/chat?message=Hello")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("quota exceeded"));
}

#[tokio::test]
async fn health_reports_service_name() {
    let app = app_with(Arc::new(MockTextProvider::echo()));

    let response = app.oneshot(chat_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "assistant-service");
}

#[tokio::test]
async fn ready_follows_provider_health() {
    let healthy = app_with(Arc::new(MockTextProvider::echo()));
    let response = healthy.oneshot(chat_request("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let unhealthy = app_with(Arc::new(MockTextProvider::failing("no key")));
    let response = unhealthy.oneshot(chat_request("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let app = app_with(Arc::new(MockTextProvider::echo()));

    let response = app.oneshot(chat_request("/summarize")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("/summarize"));
}

#[tokio::test]
async fn responses_carry_request_id_and_cors_headers() {
    let app = app_with(Arc::new(MockTextProvider::echo()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/chat?message=Hi")
                .header(header::ORIGIN, "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

//! HTTP boundary tests
//! Run with: cargo test --test http_test

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use llm_compare::infrastructure::http::{create_router, AppState};
use llm_compare::infrastructure::llm::{LLMResponse, LLMResult, LLMUsage, ProviderRegistry, LLM};
use llm_compare::{Aggregator, ProviderId};

struct EchoProvider(ProviderId);

#[async_trait]
impl LLM for EchoProvider {
    fn id(&self) -> ProviderId {
        self.0
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> LLMResult<LLMResponse> {
        Ok(LLMResponse {
            content: format!("{} heard: {}", self.0.label(), prompt),
            model: "echo".to_string(),
            usage: LLMUsage {
                total_tokens: Some(max_tokens as u64),
                remaining_tokens: None,
            },
        })
    }
}

fn app(allowed_origins: &[&str]) -> Router {
    let registry = ProviderId::ALL
        .into_iter()
        .fold(ProviderRegistry::new(), |registry, id| {
            registry.with_adapter(Arc::new(EchoProvider(id)))
        });
    let state = Arc::new(AppState::new(Aggregator::new(registry, Some("120".to_string()))));
    let origins: Vec<String> = allowed_origins.iter().map(|o| o.to_string()).collect();
    create_router(state, &origins)
}

async fn post_query(app: Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/models/query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_query_returns_results_in_order() {
    let (status, body) = post_query(
        app(&[]),
        json!({"prompt": "  Explain OSI model ", "models": ["claude", "openai", "claude"]}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "prompt": "Explain OSI model",
            "results": [
                {"id": "claude", "text": "Claude heard: Explain OSI model", "tokensUsed": 120},
                {"id": "openai", "text": "OpenAI heard: Explain OSI model", "tokensUsed": 120}
            ]
        })
    );
}

#[tokio::test]
async fn test_providers_alias_is_accepted() {
    let (status, body) = post_query(app(&[]), json!({"prompt": "hi", "providers": ["gemini"]})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["id"], "gemini");
}

#[tokio::test]
async fn test_missing_prompt_is_bad_request() {
    let (status, body) = post_query(app(&[]), json!({"models": ["openai"]})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"statusCode": 400, "message": "PROMPT_REQUIRED", "error": "Bad Request"})
    );
}

#[tokio::test]
async fn test_empty_selection_is_bad_request() {
    let (status, body) = post_query(app(&[]), json!({"prompt": "hi", "models": []})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "MODEL_SELECTION_REQUIRED");
}

#[tokio::test]
async fn test_unsupported_models_are_named() {
    let (status, body) = post_query(
        app(&[]),
        json!({"prompt": "hi", "models": ["openai", "mistral", "llama"]}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "UNSUPPORTED_MODELS:mistral,llama");
}

#[tokio::test]
async fn test_non_list_selection_is_empty() {
    let (status, body) = post_query(app(&[]), json!({"prompt": "hi", "models": "openai"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"statusCode": 400, "message": "MODEL_SELECTION_REQUIRED", "error": "Bad Request"})
    );
}

#[tokio::test]
async fn test_non_string_model_is_unsupported() {
    let (status, body) = post_query(app(&[]), json!({"prompt": "hi", "models": ["openai", 5]})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "UNSUPPORTED_MODELS:5");
}

#[tokio::test]
async fn test_non_string_prompt_is_required() {
    let (status, body) = post_query(app(&[]), json!({"prompt": 42, "models": ["openai"]})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "PROMPT_REQUIRED");
}

#[tokio::test]
async fn test_health() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(&[]).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_allows_configured_origin_only() {
    let preflight = |origin: &str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/models/query")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let app = app(&["http://localhost:5173"]);

    let allowed = app.clone().oneshot(preflight("http://localhost:5173")).await.unwrap();
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );

    let denied = app.oneshot(preflight("http://evil.test")).await.unwrap();
    assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}

#[tokio::test]
async fn test_cors_mirrors_any_origin_when_unconfigured() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/models/query")
        .header(header::ORIGIN, "http://anything.test")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({"prompt": "hi", "models": ["openai"]}).to_string()))
        .unwrap();

    let response = app(&[]).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://anything.test"
    );
}

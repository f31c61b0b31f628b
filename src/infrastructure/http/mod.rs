//! HTTP API - prompt submission endpoint

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::application::errors::{AppError, ValidationError};
use crate::application::services::Aggregator;

/// Shared state for request handlers
pub struct AppState {
    pub aggregator: Aggregator,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self { aggregator }
    }
}

/// Prompt submission body; wrongly typed fields reach validation as empty or unsupported
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub prompt: Option<Value>,
    #[serde(default, alias = "providers")]
    pub models: Option<Value>,
}

impl QueryRequest {
    /// A non-string prompt counts as empty
    pub fn prompt(&self) -> &str {
        self.prompt.as_ref().and_then(Value::as_str).unwrap_or("")
    }

    /// A non-array selection counts as empty; non-string entries keep their JSON text
    pub fn models(&self) -> Vec<String> {
        match &self.models {
            Some(Value::Array(entries)) => entries
                .iter()
                .map(|entry| match entry {
                    Value::String(id) => id.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Client error body
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub error: String,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let body = ErrorResponse {
            status_code: status.as_u16(),
            message: self.to_string(),
            error: status.canonical_reason().unwrap_or("Bad Request").to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>, bind_addr: &str, allowed_origins: &[String]) -> Result<(), AppError> {
    let app = create_router(state, allowed_origins);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", bind_addr, e)))?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/models/query", post(query_handler))
        .with_state(state)
        .layer(cors_layer(allowed_origins))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// CORS for the configured origins; an empty list mirrors any origin
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid allowed origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Prompt handler - POST /models/query
async fn query_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> Response {
    let models = request.models();

    match state.aggregator.aggregate(request.prompt(), &models).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            warn!("Rejected prompt request: {}", e);
            e.into_response()
        }
    }
}

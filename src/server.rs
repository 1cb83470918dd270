//! HTTP serving mode.
//!
//! Exposes the query path over JSON HTTP:
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/rag-query` | Answer a question from indexed context |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! A missing or empty `question` is rejected with `400 {"error": ...}`
//! before any downstream call; any embedding, search, or synthesis failure
//! surfaces as `500 {"error": ...}` for that request only. Requests share
//! nothing mutable, so one failure never affects another.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::embedding::{LanguageModel, OpenAiClient};
use crate::index::{RemoteIndex, VectorIndex};
use crate::query::answer_question;

/// Shared application state passed to route handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model: Arc<dyn LanguageModel>,
    pub index: Arc<dyn VectorIndex>,
}

/// Start the HTTP server with the real OpenAI and vector index clients.
///
/// Binds to `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let state = AppState {
        config: Arc::new(config.clone()),
        model: Arc::new(OpenAiClient::new(&config.openai)?),
        index: Arc::new(RemoteIndex::new(&config.index)?),
    };

    let bind_addr = config.server.bind.clone();
    let app = build_router(state);

    println!("Server listening on http://{}", bind_addr);
    println!("  POST /rag-query");
    println!("  GET  /health");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router. Separated from [`run_server`] so tests can drive the
/// handlers with fake collaborators.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/rag-query", post(handle_rag_query))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

// ============ Error response ============

/// Flat JSON error body: `{"error": "<message>"}`.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

fn server_error(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}

// ============ POST /rag-query ============

#[derive(Deserialize)]
struct RagQueryRequest {
    #[serde(default)]
    question: Option<String>,
}

/// Handler for `POST /rag-query`.
async fn handle_rag_query(
    State(state): State<AppState>,
    Json(request): Json<RagQueryRequest>,
) -> Result<Json<crate::models::Answer>, AppError> {
    // Reject missing/empty questions here so no downstream call is made.
    let question = match request.question.as_deref().map(str::trim) {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => return Err(bad_request("question is required")),
    };

    println!("[Query] {}", question);

    let answer = answer_question(
        state.config.as_ref(),
        state.model.as_ref(),
        state.index.as_ref(),
        &question,
    )
    .await
    .map_err(|e| server_error(format!("{:#}", e)))?;

    Ok(Json(answer))
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Handler for `GET /health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

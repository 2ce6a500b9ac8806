//! API request handlers

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use tracing::error;
use tracing::info;

use crate::api::types::ChatRequest;
use crate::api::types::ChatResponse;
use crate::api::types::ErrorResponse;
use crate::api::types::HealthResponse;
use crate::chat::ChatDispatcher;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<ChatDispatcher>,
    pub static_dir: PathBuf,
}

/// Landing page handler (GET /)
pub async fn index(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let index_path = state.static_dir.join("index.html");

    match tokio::fs::read_to_string(&index_path).await {
        Ok(content) => Ok(Html(content)),
        Err(_) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                detail: "HTML file not found".to_string(),
            }),
        )),
    }
}

/// Chat handler (POST /chat/)
///
/// Dispatcher failures surface as 500 with the failure description in
/// `detail`; no-match conditions are normal 200 responses.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    info!("POST /chat/ from user {}", req.user_id);

    match state.dispatcher.handle(&req.user_id, &req.message).await {
        Ok(response) => Ok(Json(ChatResponse { response })),
        Err(e) => {
            error!("Error handling chat message: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: e.to_string(),
                }),
            ))
        }
    }
}

/// Health check handler (GET /health)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

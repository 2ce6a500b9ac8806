//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers;
use super::handlers::AppState;

/// Create the application router
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        // Static landing page
        .route("/", get(handlers::index))
        // Chat endpoint
        .route("/chat/", post(handlers::chat))
        // Health check
        .route("/health", get(handlers::health))
        .with_state(state)
}

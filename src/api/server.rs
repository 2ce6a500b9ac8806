//! HTTP server implementation

use std::path::PathBuf;
use std::sync::Arc;

use tower_http::compression::CompressionLayer;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::handlers::AppState;
use crate::api::routes;
use crate::chat::ChatDispatcher;
use crate::config::AppConfig;
use crate::dataset::DatasetStore;
use crate::preferences::PreferenceStore;
use crate::rag::AnswerProvider;
use crate::rag::RagService;
use crate::Result;

/// Start the API server
///
/// # Errors
/// - Dataset load failures (missing file, malformed CSV) are fatal
/// - RAG pipeline construction failures (embedding backend down) are fatal
/// - Bind/serve errors
pub async fn serve_api(
    config: &AppConfig,
    host: String,
    port: u16,
    enable_cors: bool,
) -> Result<()> {
    info!("Starting MixRAG API server...");

    // Initialize services; any failure here stops the process before serving
    let dataset = Arc::new(DatasetStore::from_csv_path(config.dataset_path())?);
    let preferences = Arc::new(PreferenceStore::new());
    let answerer: Arc<dyn AnswerProvider> =
        Arc::new(RagService::new(config, dataset.clone()).await?);

    let dispatcher = Arc::new(ChatDispatcher::new(dataset, preferences, answerer));

    let state = AppState {
        dispatcher,
        static_dir: PathBuf::from(config.static_dir()),
    };

    let mut app = routes::app_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    // Add CORS if enabled
    if enable_cors {
        info!("CORS enabled");
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("API server listening on http://{addr}");
    info!("Available endpoints:");
    info!("  GET  /        - Chat landing page");
    info!("  POST /chat/   - Chat endpoint");
    info!("  GET  /health  - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP surface tests
//!
//! Drives the axum router directly with `tower::ServiceExt::oneshot`, with
//! the retrieval fallback replaced by a stub.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::Response;
use axum::http::StatusCode;
use axum::Router;
use tower::ServiceExt;

use mixrag::api::handlers::AppState;
use mixrag::api::routes::app_routes;
use mixrag::chat::ChatDispatcher;
use mixrag::dataset::DatasetStore;
use mixrag::errors::MixRagError;
use mixrag::models::CocktailEntry;
use mixrag::preferences::PreferenceStore;
use mixrag::rag::AnswerProvider;

struct StubAnswerer {
    reply: Option<String>,
    fail: bool,
}

#[async_trait]
impl AnswerProvider for StubAnswerer {
    async fn answer(&self, _query: &str) -> mixrag::Result<Option<String>> {
        if self.fail {
            return Err(MixRagError::Generation("backend unavailable".to_string()));
        }
        Ok(self.reply.clone())
    }
}

fn sample_dataset() -> Arc<DatasetStore> {
    Arc::new(DatasetStore::from_entries(vec![
        CocktailEntry {
            name: "Mojito".to_string(),
            ingredients: "mint, rum, sugar".to_string(),
            category: "Alcoholic".to_string(),
        },
        CocktailEntry {
            name: "Virgin Mojito".to_string(),
            ingredients: "mint, lime, soda".to_string(),
            category: "Non alcoholic".to_string(),
        },
    ]))
}

fn test_app(static_dir: PathBuf, answerer: StubAnswerer) -> Router {
    let dispatcher = Arc::new(ChatDispatcher::new(
        sample_dataset(),
        Arc::new(PreferenceStore::new()),
        Arc::new(answerer),
    ));

    app_routes(AppState {
        dispatcher,
        static_dir,
    })
}

fn chat_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_chat_endpoint_returns_response() {
    let app = test_app(
        PathBuf::from("static"),
        StubAnswerer {
            reply: None,
            fail: false,
        },
    );

    let response = app
        .oneshot(chat_request(
            r#"{"user_id": "u1", "message": "show me cocktails containing mint"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["response"],
        "Mojito – mint, rum, sugar\nVirgin Mojito – mint, lime, soda"
    );
}

#[tokio::test]
async fn test_chat_endpoint_surfaces_fallback_failure() {
    let app = test_app(
        PathBuf::from("static"),
        StubAnswerer {
            reply: None,
            fail: true,
        },
    );

    let response = app
        .oneshot(chat_request(
            r#"{"user_id": "u1", "message": "tell me a cocktail story"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    let detail = json["detail"].as_str().unwrap();
    assert!(detail.contains("backend unavailable"));
}

#[tokio::test]
async fn test_chat_endpoint_uses_fallback_answer() {
    let app = test_app(
        PathBuf::from("static"),
        StubAnswerer {
            reply: Some("Try a Negroni.".to_string()),
            fail: false,
        },
    );

    let response = app
        .oneshot(chat_request(
            r#"{"user_id": "u1", "message": "tell me a cocktail story"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["response"], "Try a Negroni.");
}

#[tokio::test]
async fn test_chat_endpoint_rejects_malformed_body() {
    let app = test_app(
        PathBuf::from("static"),
        StubAnswerer {
            reply: None,
            fail: false,
        },
    );

    // Missing the message field; rejected before the dispatcher runs
    let response = app
        .oneshot(chat_request(r#"{"user_id": "u1"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_index_serves_static_html() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<html><body>MixRAG</body></html>",
    )
    .unwrap();

    let app = test_app(
        dir.path().to_path_buf(),
        StubAnswerer {
            reply: None,
            fail: false,
        },
    );

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("MixRAG"));
}

#[tokio::test]
async fn test_index_missing_returns_404() {
    let app = test_app(
        PathBuf::from("no-such-static-dir"),
        StubAnswerer {
            reply: None,
            fail: false,
        },
    );

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "HTML file not found");
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app(
        PathBuf::from("static"),
        StubAnswerer {
            reply: None,
            fail: false,
        },
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

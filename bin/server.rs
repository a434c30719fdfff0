// Journalizer - Web Server
// Thin HTTP boundary over the classification core: one POST endpoint plus an
// embedded frontend page. All decision logic lives in the library.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use journalizer::{LexiconExtractor, LogObserver, TransactionBuilder};

/// Shared application state
#[derive(Clone)]
struct AppState {
    builder: Arc<TransactionBuilder>,
}

#[derive(Deserialize)]
struct ProcessRequest {
    text: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": journalizer::VERSION }))
}

/// POST /process_transaction - Classify one sentence
///
/// Missing or blank text is a client error; anything that goes wrong inside
/// classification is reported as a server error without taking the process
/// down.
async fn process_transaction(
    State(state): State<AppState>,
    body: Option<Json<ProcessRequest>>,
) -> impl IntoResponse {
    let Some(text) = body.and_then(|Json(req)| req.text) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid request format - text field required" })),
        )
            .into_response();
    };
    if text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Empty transaction text" })),
        )
            .into_response();
    }

    // the extractor call is blocking; keep it off the async workers
    let builder = state.builder.clone();
    match tokio::task::spawn_blocking(move || builder.build(&text)).await {
        Ok(Ok(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(Err(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Server error: {}", e) })),
        )
            .into_response(),
        Err(e) => {
            log::error!("classification task panicked: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server error: classification failed" })),
            )
                .into_response()
        }
    }
}

/// GET / - Serve the embedded frontend
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("📒 Journalizer - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let builder = Arc::new(TransactionBuilder::new(
        Box::new(LexiconExtractor::with_defaults()),
        Box::new(LogObserver),
    ));
    let state = AppState { builder };

    let app = Router::new()
        .route("/", get(serve_index))
        .route("/process_transaction", post(process_transaction))
        .route("/api/health", get(health_check))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = std::env::var("JOURNALIZER_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    println!("🚀 Journalizer server running on http://{}", addr);
    println!("   POST http://{}/process_transaction", addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}

//! Axum router configuration with middleware.
//!
//! API routes live under `/api/`. Middleware: CORS, request tracing.
//!
//! When a web directory is configured and exists, unknown paths fall through
//! to it, with `index.html` as the fallback for client-side routing.

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState, web_dir: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/models", get(handlers::models::list_models))
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations)
                .post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversations/{id}",
            get(handlers::conversation::get_conversation)
                .put(handlers::conversation::update_conversation)
                .delete(handlers::conversation::delete_conversation),
        )
        .route("/chat", post(handlers::chat::chat));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(web_dir) = web_dir {
        if Path::new(web_dir).exists() {
            let index_path = Path::new(web_dir).join("index.html");
            let serve_dir = ServeDir::new(web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "Static file serving enabled");
        } else {
            tracing::warn!(path = %web_dir, "Web directory not found, serving API only");
        }
    }

    router
}

/// GET /health - Liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

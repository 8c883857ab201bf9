//! AppForge Service - Main Entry Point
//!
//! Turns model completions into ready-to-download project files.

use anyhow::Result;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use appforge::api::auth;
use appforge::api::handlers::{self, AppState};
use appforge::extract::FileExtractor;
use appforge::llm::ChatClient;
use appforge::types::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "appforge=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    info!("Starting AppForge Service v{}", env!("CARGO_PKG_VERSION"));
    info!("Completion upstream: {}", config.llm_base_url);
    if config.api_tokens.is_empty() {
        info!("No API tokens configured; auth check disabled");
    }

    // Initialize components
    let backend = ChatClient::new(&config.llm_base_url, config.llm_api_key.as_deref())
        .with_timeout(config.request_timeout_secs);

    let state = Arc::new(AppState {
        backend: Arc::new(backend),
        extractor: FileExtractor::new(),
        config,
    });

    // Build HTTP routes
    let app = Router::new()
        // App generation and packaging (token-protected)
        .route("/apps/generate", post(handlers::generate_app))
        .route("/apps/package", post(handlers::package_app))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_token,
        ))
        // Health check
        .route("/health", get(handlers::health_check))
        // State
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3020);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

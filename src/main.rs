//! Summarizer Service - Main Entry Point
//!
//! HTTP front end for long-document news summarization.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use summarizer::api::handlers::{self, AppState};
use summarizer::generation::{ModelHandle, RemoteModelLoader};
use summarizer::pipeline::Summarizer;
use summarizer::service::SummaryService;
use summarizer::types::SummarizerConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "summarizer=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = SummarizerConfig::from_env();

    info!("Starting Summarizer Service v{}", env!("CARGO_PKG_VERSION"));
    info!(
        model_service = %config.model_service_url,
        model_version = %config.model_version,
        max_source_len = config.max_source_len,
        "Loaded configuration"
    );

    // The model loads lazily on the first request
    let loader = Arc::new(RemoteModelLoader::from_config(&config));
    let model = Arc::new(ModelHandle::new(loader));
    let summarizer = Arc::new(Summarizer::new(model, config));

    let state = Arc::new(AppState {
        service: SummaryService::new(summarizer),
    });

    // Build HTTP routes
    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/summarize", post(handlers::summarize))
        .route(
            "/articles/summary",
            post(handlers::summarize_article).get(handlers::get_article_summary),
        )
        .route("/model/release", post(handlers::release_model))
        .with_state(state)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        );

    // Start server
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3017);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

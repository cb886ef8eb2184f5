//! HTTP request handlers for the summarization service.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::service::SummaryService;
use crate::types::{
    ArticleSummaryQuery, ArticleSummaryRequest, ArticleSummaryResponse, SummarizeRequest,
    SummarizeResponse,
};

/// Application state shared across handlers.
pub struct AppState {
    pub service: SummaryService,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    model_version: String,
    model_loaded: bool,
    cached_summaries: usize,
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model_version: state.service.model_version().to_string(),
        model_loaded: state.service.model_loaded(),
        cached_summaries: state.service.cached_summaries().await,
    })
}

/// Summarize an ad-hoc document.
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Json<SummarizeResponse> {
    info!(body_chars = request.body.chars().count(), "Received summarize request");

    let outcome = state.service.summarize(request.into()).await;
    Json(SummarizeResponse {
        was_fallback: outcome.was_fallback(),
        mode: outcome.mode,
        summary: outcome.text,
    })
}

/// Summarize a crawled article, served from the store when unchanged.
pub async fn summarize_article(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ArticleSummaryRequest>,
) -> Result<Json<ArticleSummaryResponse>, StatusCode> {
    if request.url.trim().is_empty() {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    info!(url = %request.url, "Received article summary request");
    Ok(Json(state.service.summarize_article(request).await))
}

/// Get a stored article summary.
pub async fn get_article_summary(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArticleSummaryQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    match state
        .service
        .lookup(&query.url, query.model_version.as_deref())
        .await
    {
        Some(record) => Ok(Json(record)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Unload the model.
pub async fn release_model(State(state): State<Arc<AppState>>) -> StatusCode {
    state.service.release_model().await;
    StatusCode::NO_CONTENT
}

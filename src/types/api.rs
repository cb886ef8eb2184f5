//! Request/response definitions for the HTTP surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Document, SummaryMode};

/// Request to summarize an ad-hoc document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
}

impl From<SummarizeRequest> for Document {
    fn from(request: SummarizeRequest) -> Self {
        Document {
            title: request.title,
            body: request.body,
        }
    }
}

/// Response for an ad-hoc summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    pub mode: SummaryMode,
    pub was_fallback: bool,
}

/// Request to summarize a crawled article, cached by URL and model version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummaryRequest {
    /// Stable article key (canonical URL)
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
    /// Publisher name ("vietnamnet"); selects source-specific summary fixes
    #[serde(default)]
    pub source: Option<String>,
    /// Recompute even when a fresh stored summary exists
    #[serde(default)]
    pub force_refresh: bool,
}

impl ArticleSummaryRequest {
    /// The document part of the request.
    pub fn document(&self) -> Document {
        Document {
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

/// Response for a cached article summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummaryResponse {
    pub url: String,
    pub model_version: String,
    pub summary: String,
    /// Served from the store without running the pipeline
    pub cached: bool,
    pub was_fallback: bool,
}

/// Query for a stored summary.
#[derive(Debug, Clone, Deserialize)]
pub struct ArticleSummaryQuery {
    pub url: String,
    #[serde(default)]
    pub model_version: Option<String>,
}

/// A stored summary as returned by the lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecordResponse {
    pub id: Uuid,
    pub url: String,
    pub model_version: String,
    pub content_digest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

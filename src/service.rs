//! Cache-aware summarization service used by the HTTP layer.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::pipeline::Summarizer;
use crate::store::SummaryStore;
use crate::types::{
    ArticleSummaryRequest, ArticleSummaryResponse, Document, SummaryOutcome,
    SummaryRecordResponse,
};

/// Runs the synchronous pipeline on the blocking pool under a deadline and
/// caches article summaries per model version.
pub struct SummaryService {
    summarizer: Arc<Summarizer>,
    store: RwLock<SummaryStore>,
    model_version: String,
    timeout: Duration,
}

impl SummaryService {
    /// Create a service around a summarizer, taking version and deadline from
    /// its configuration.
    pub fn new(summarizer: Arc<Summarizer>) -> Self {
        let config = summarizer.config();
        let model_version = config.model_version.clone();
        let timeout = Duration::from_secs(config.summarize_timeout_secs);
        let store = SummaryStore::with_capacity(config.store_capacity);
        Self {
            summarizer,
            store: RwLock::new(store),
            model_version,
            timeout,
        }
    }

    /// Override the per-call deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn summarizer(&self) -> &Arc<Summarizer> {
        &self.summarizer
    }

    pub fn model_version(&self) -> &str {
        &self.model_version
    }

    /// Whether the model is currently resident.
    pub fn model_loaded(&self) -> bool {
        self.summarizer.model().is_loaded()
    }

    /// Number of article summaries currently stored.
    pub async fn cached_summaries(&self) -> usize {
        self.store.read().await.record_count()
    }

    /// Summarize a document. Never fails; a deadline overrun or a crashed
    /// worker yields the fallback excerpt.
    pub async fn summarize(&self, document: Document) -> SummaryOutcome {
        if document.is_blank() {
            return SummaryOutcome::empty();
        }

        let summarizer = Arc::clone(&self.summarizer);
        let body = document.body.clone();
        let task = tokio::task::spawn_blocking(move || summarizer.summarize_document(&document));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!(error = %e, "Summarization worker failed");
                SummaryOutcome::fallback(self.summarizer.fallback_excerpt(&body))
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "Summarization timed out, returning fallback excerpt"
                );
                SummaryOutcome::fallback(self.summarizer.fallback_excerpt(&body))
            }
        }
    }

    /// Summarize a crawled article, reusing the stored summary while its
    /// content is unchanged unless `force_refresh` is set. Fallback excerpts
    /// are returned but never stored.
    pub async fn summarize_article(&self, request: ArticleSummaryRequest) -> ArticleSummaryResponse {
        let document = request.document();
        let digest = document.content_digest();

        if !request.force_refresh {
            let store = self.store.read().await;
            if let Some(record) = store.lookup_fresh(&request.url, &self.model_version, &digest) {
                info!(url = %request.url, "Serving stored summary");
                return ArticleSummaryResponse {
                    url: request.url,
                    model_version: self.model_version.clone(),
                    summary: record.summary.clone(),
                    cached: true,
                    was_fallback: false,
                };
            }
        }

        let mut outcome = self.summarize(document).await;
        let was_fallback = outcome.was_fallback();
        outcome.text = self
            .summarizer
            .finish_for_source(&outcome.text, request.source.as_deref());

        if !was_fallback {
            let mut store = self.store.write().await;
            store.upsert(
                &request.url,
                &self.model_version,
                &digest,
                request.title.clone(),
                outcome.text.clone(),
            );
        }

        info!(
            url = %request.url,
            mode = %outcome.mode,
            stored = !was_fallback,
            forced = request.force_refresh,
            "Article summarized"
        );

        ArticleSummaryResponse {
            url: request.url,
            model_version: self.model_version.clone(),
            summary: outcome.text,
            cached: false,
            was_fallback,
        }
    }

    /// Stored summary for an article, defaulting to the current model version.
    pub async fn lookup(&self, url: &str, model_version: Option<&str>) -> Option<SummaryRecordResponse> {
        let version = model_version.unwrap_or(&self.model_version);
        let store = self.store.read().await;
        store.get(url, version).map(|record| record.to_response())
    }

    /// Unload the model; the next request loads it again.
    pub async fn release_model(&self) {
        let summarizer = Arc::clone(&self.summarizer);
        if let Err(e) = tokio::task::spawn_blocking(move || summarizer.release_resources()).await {
            error!(error = %e, "Model release failed");
        }
    }
}

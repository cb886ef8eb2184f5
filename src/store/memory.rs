//! In-memory summary store keyed by article and model version.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::types::SummaryRecordResponse;
use crate::DEFAULT_STORE_CAPACITY;

/// One stored summary.
#[derive(Debug, Clone)]
pub struct SummaryRecord {
    pub id: Uuid,
    pub article_key: String,
    pub model_version: String,
    pub content_digest: String,
    pub title: Option<String>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SummaryRecord {
    /// Create a new record.
    pub fn new(
        article_key: &str,
        model_version: &str,
        content_digest: &str,
        title: Option<String>,
        summary: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            article_key: article_key.to_string(),
            model_version: model_version.to_string(),
            content_digest: content_digest.to_string(),
            title,
            summary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this record was produced from content with the given digest.
    pub fn matches(&self, content_digest: &str) -> bool {
        self.content_digest == content_digest
    }

    /// Convert to response type.
    pub fn to_response(&self) -> SummaryRecordResponse {
        SummaryRecordResponse {
            id: self.id,
            url: self.article_key.clone(),
            model_version: self.model_version.clone(),
            content_digest: self.content_digest.clone(),
            title: self.title.clone(),
            summary: self.summary.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

type RecordKey = (String, String);

/// Summaries by `(article key, model version)`.
///
/// A record is only fresh while the article's content digest is unchanged;
/// editing the article or switching model version forces a new summary.
/// Holds at most `capacity` records; inserting past that evicts the record
/// updated longest ago.
pub struct SummaryStore {
    records: HashMap<RecordKey, SummaryRecord>,
    capacity: usize,
}

impl SummaryStore {
    /// Create an empty store with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_STORE_CAPACITY)
    }

    /// Create an empty store holding at most `capacity` records (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::new(),
            capacity: capacity.max(1),
        }
    }

    fn key(article_key: &str, model_version: &str) -> RecordKey {
        (article_key.to_string(), model_version.to_string())
    }

    /// Get a record regardless of its digest.
    pub fn get(&self, article_key: &str, model_version: &str) -> Option<&SummaryRecord> {
        self.records.get(&Self::key(article_key, model_version))
    }

    /// Get a record only if it was built from content with `content_digest`.
    pub fn lookup_fresh(
        &self,
        article_key: &str,
        model_version: &str,
        content_digest: &str,
    ) -> Option<&SummaryRecord> {
        self.get(article_key, model_version)
            .filter(|record| record.matches(content_digest))
    }

    /// Insert or replace the summary for an article. An existing record keeps
    /// its id and creation time.
    pub fn upsert(
        &mut self,
        article_key: &str,
        model_version: &str,
        content_digest: &str,
        title: Option<String>,
        summary: String,
    ) -> &SummaryRecord {
        let key = Self::key(article_key, model_version);
        if !self.records.contains_key(&key) && self.records.len() >= self.capacity {
            self.evict_oldest();
        }

        self.records
            .entry(key)
            .and_modify(|record| {
                record.content_digest = content_digest.to_string();
                record.title = title.clone();
                record.summary = summary.clone();
                record.updated_at = Utc::now();
            })
            .or_insert_with(|| {
                SummaryRecord::new(article_key, model_version, content_digest, title, summary)
            })
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .records
            .iter()
            .min_by_key(|(_, record)| record.updated_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.records.remove(&key);
            debug!(url = %key.0, model_version = %key.1, "Evicted stored summary");
        }
    }

    /// Number of stored records.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

//! Configuration types for summarization.

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_FALLBACK_MAX_CHARS, DEFAULT_MAX_PARAGRAPHS, DEFAULT_MAX_SOURCE_LEN,
    DEFAULT_MODEL_VERSION, DEFAULT_PARAGRAPH_MAX_NEW_TOKENS, DEFAULT_PARAGRAPH_SOURCE_LEN,
    DEFAULT_STORE_CAPACITY,
};

/// Global summarization service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Source-length ceiling in tokens; also the paragraph-mode trigger
    pub max_source_len: usize,

    /// Source-length ceiling for a single paragraph generation
    pub paragraph_source_len: usize,

    /// Maximum paragraphs summarized in paragraph mode
    pub max_paragraphs: usize,

    /// Cap on new tokens for a paragraph mini-summary
    pub paragraph_max_new_tokens: usize,

    /// Character budget of the fallback excerpt
    pub fallback_max_chars: usize,

    /// Strip the known-source header block (title echo, author, rating widgets)
    pub strip_source_header: bool,

    /// Base URL of the model server
    pub model_service_url: String,

    /// Version tag stored next to every cached summary
    pub model_version: String,

    /// Per-request timeout towards the model server, in seconds
    pub model_timeout_secs: u64,

    /// Upper bound on a whole `summarize` call made through the service, in seconds
    pub summarize_timeout_secs: u64,

    /// Maximum number of stored article summaries
    pub store_capacity: usize,

    /// Decoding parameters forwarded to the model server
    pub decoding: DecodingParams,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
            paragraph_source_len: DEFAULT_PARAGRAPH_SOURCE_LEN,
            max_paragraphs: DEFAULT_MAX_PARAGRAPHS,
            paragraph_max_new_tokens: DEFAULT_PARAGRAPH_MAX_NEW_TOKENS,
            fallback_max_chars: DEFAULT_FALLBACK_MAX_CHARS,
            strip_source_header: true,
            model_service_url: "http://localhost:8008".to_string(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            model_timeout_secs: 120,
            summarize_timeout_secs: 600,
            store_capacity: DEFAULT_STORE_CAPACITY,
            decoding: DecodingParams::default(),
        }
    }
}

impl SummarizerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_source_len: env_or("MAX_SOURCE_LEN", defaults.max_source_len),
            paragraph_source_len: env_or("PARAGRAPH_SOURCE_LEN", defaults.paragraph_source_len),
            max_paragraphs: env_or("MAX_PARAGRAPHS", defaults.max_paragraphs),
            paragraph_max_new_tokens: env_or(
                "PARAGRAPH_MAX_NEW_TOKENS",
                defaults.paragraph_max_new_tokens,
            ),
            fallback_max_chars: env_or("FALLBACK_MAX_CHARS", defaults.fallback_max_chars),
            strip_source_header: env_or("STRIP_SOURCE_HEADER", defaults.strip_source_header),
            model_service_url: std::env::var("MODEL_SERVICE_URL")
                .unwrap_or(defaults.model_service_url),
            model_version: std::env::var("MODEL_VERSION").unwrap_or(defaults.model_version),
            model_timeout_secs: env_or("MODEL_TIMEOUT_SECS", defaults.model_timeout_secs),
            summarize_timeout_secs: env_or(
                "SUMMARIZE_TIMEOUT_SECS",
                defaults.summarize_timeout_secs,
            ),
            store_capacity: env_or("SUMMARY_STORE_CAPACITY", defaults.store_capacity),
            decoding: defaults.decoding,
        }
    }

    /// Source-length ceiling used for paragraph generations.
    pub fn paragraph_source_limit(&self) -> usize {
        self.max_source_len.min(self.paragraph_source_len)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Beam-search settings sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingParams {
    pub num_beams: u32,
    pub length_penalty: f32,
    pub no_repeat_ngram_size: u32,
    pub repetition_penalty: f32,
    pub early_stopping: bool,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            num_beams: 5,
            length_penalty: 0.7,
            no_repeat_ngram_size: 3,
            repetition_penalty: 1.1,
            early_stopping: true,
        }
    }
}

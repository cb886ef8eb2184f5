//! News Summarizer Library
//!
//! Long-document abstractive summarization for scraped news articles. Bodies
//! are cleaned of bylines, captions and solicitation boxes, then summarized in
//! a single pass or, for long articles, paragraph by paragraph with a final
//! reduction. Generation failures degrade to a cleaned excerpt of the body.

pub mod api;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod processing;
pub mod service;
pub mod store;
pub mod types;

pub use error::{Result, SummarizeError};
pub use generation::{ModelHandle, ModelLoader, RemoteModelLoader, SequenceModel};
pub use pipeline::Summarizer;
pub use service::SummaryService;
pub use types::{Document, SummarizerConfig, SummaryMode, SummaryOutcome};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::*;
    pub use crate::generation::*;
    pub use crate::pipeline::*;
    pub use crate::processing::*;
    pub use crate::types::*;
}

/// Default source-length ceiling in tokens
pub const DEFAULT_MAX_SOURCE_LEN: usize = 1500;

/// Default source-length ceiling for one paragraph, in tokens
pub const DEFAULT_PARAGRAPH_SOURCE_LEN: usize = 900;

/// Default number of paragraphs summarized in paragraph mode
pub const DEFAULT_MAX_PARAGRAPHS: usize = 8;

/// Default cap on new tokens for a paragraph mini-summary
pub const DEFAULT_PARAGRAPH_MAX_NEW_TOKENS: usize = 160;

/// Default length of the fallback excerpt, in characters
pub const DEFAULT_FALLBACK_MAX_CHARS: usize = 800;

/// Default number of summaries kept in memory
pub const DEFAULT_STORE_CAPACITY: usize = 10_000;

/// Default version tag for stored summaries
pub const DEFAULT_MODEL_VERSION: &str = "v1";

//! Core types for the summarization service.

mod api;
mod config;
mod document;
mod range;
mod summary;

pub use api::{
    ArticleSummaryQuery, ArticleSummaryRequest, ArticleSummaryResponse, SummarizeRequest,
    SummarizeResponse, SummaryRecordResponse,
};
pub use config::{DecodingParams, SummarizerConfig};
pub use document::Document;
pub use range::TokenRange;
pub use summary::{SummaryMode, SummaryOutcome};
